use crate::handlers;
use actix_web::web;

/// The closed set of supported routes. Anything else falls through to the
/// `not_found` default service wired up next to this in `main`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/command/logs/{name}", web::get().to(handlers::logs))
        .route("/command/inspect/{name}", web::get().to(handlers::inspect))
        .route("/health/{name}", web::get().to(handlers::health));
}
