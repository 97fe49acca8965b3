//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod session;

pub use auth::{AuthError, IdentityVerifier};
pub use repository::{BaseRepository, PostRepository, PostStore, PostTransaction};
pub use session::{SessionData, SessionError, SessionStore};
