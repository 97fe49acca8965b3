//! # Folio Core
//!
//! The domain layer of the Folio blog backend: the post entity, the post
//! service, the ports storage and sessions must implement, and the session
//! user resolver. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod session;

pub use error::DomainError;
