use actix_cors::Cors;
use actix_web::{web, Resource};

use crate::error;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(resource("/hello").route(web::get().to(handlers::hello)))
            .service(resource("/chat").route(web::post().to(handlers::chat))),
    )
    .service(resource("/").route(web::get().to(handlers::index)))
    .service(resource("/test").route(web::get().to(handlers::test_database)))
    .default_service(web::to(error::not_found));
}

// Known path, unknown method: 405 rather than falling through to 404
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(error::method_not_allowed))
}

/// Every origin, method and header is allowed, with credentials. The request
/// origin is echoed back in `Access-Control-Allow-Origin`.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}
