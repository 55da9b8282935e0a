//! HTTP handlers and route configuration.

mod blog;
mod health;

use actix_web::web;

/// Configure all application routes, with the blog mounted under `prefix`.
pub fn configure_routes(cfg: &mut web::ServiceConfig, prefix: &str) {
    cfg.route("/api/health", web::get().to(health::health_check))
        .service(
            web::scope(prefix)
                // Public routes
                .route("", web::get().to(blog::index))
                .route("/", web::get().to(blog::index))
                .route("/all", web::get().to(blog::index))
                .route("/view/{id}", web::get().to(blog::view))
                // Write routes, gated by Basic Auth
                .route("/edit/{id}", web::get().to(blog::edit))
                .route("/save/{id}", web::post().to(blog::save))
                .route("/save/{id}", web::get().to(blog::save_via_get))
                .route("/del/{id}", web::get().to(blog::delete))
                .route("/del/{id}", web::post().to(blog::delete))
                .route("/add", web::get().to(blog::add_form))
                .route("/add", web::post().to(blog::add)),
        );
}
