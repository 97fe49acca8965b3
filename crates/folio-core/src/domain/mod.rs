//! Domain entities - the core business objects.

mod post;
mod session_user;

pub use post::{Post, TITLE_MAX_LEN};
pub use session_user::SessionUser;
