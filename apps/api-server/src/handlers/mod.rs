//! HTTP handlers and route configuration.

mod auth;
mod health;
mod index;
mod posts;


use actix_web::web;

use crate::middleware::error::AppError;

/// JSON body settings: malformed bodies get the same problem-details
/// response as every other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::index)).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Session routes
            .service(
                web::scope("/auth")
                    .route("/session", web::post().to(auth::login))
                    .route("/session", web::delete().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes
            .service(
                web::scope("/v1/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::save))
                    .route("/{id}", web::get().to(posts::find_by_id))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            ),
    );
}
