//! Resolution of the authenticated user from session state.

use crate::domain::SessionUser;
use crate::ports::SessionData;

/// Session attribute the logged-in user is stored under.
pub const SESSION_USER_KEY: &str = "user";

/// Return the user held by `session`, or `None` for an anonymous session.
///
/// Anonymous access is normal, so a missing or undecodable entry is `None`
/// rather than an error. Reads only; the session is never modified.
pub fn resolve(session: &SessionData) -> Option<SessionUser> {
    session
        .get::<SessionUser>(SESSION_USER_KEY)
        .ok()
        .flatten()
}
