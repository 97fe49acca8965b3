//! Application services - orchestrate ports on behalf of request handlers.

mod post_service;

pub use post_service::PostService;
