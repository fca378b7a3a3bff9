//! HTTP handlers and route configuration.

mod admin;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .route("", web::get().to(posts::list))
            .route("/{year}/{month}/{day}/{slug}", web::get().to(posts::detail)),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/admin/posts")
                    .route("", web::get().to(admin::list))
                    .route("", web::post().to(admin::create))
                    // Registered before `/{id}` so it is not parsed as an id.
                    .route("/config", web::get().to(admin::config))
                    .route("/{id}", web::get().to(admin::get))
                    .route("/{id}", web::put().to(admin::update))
                    .route("/{id}", web::delete().to(admin::delete)),
            ),
    );
}
