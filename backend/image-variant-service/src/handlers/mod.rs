/// HTTP handlers for image-variant-service
///
/// - Rewrite: the trigger endpoint the CDN edge calls per request
/// - Health: liveness, readiness and metrics
pub mod health;
pub mod rewrite;

pub use health::{health, live, metrics_text, ready, HealthCheck};
pub use rewrite::rewrite_request;

use actix_web::web;

/// Register all routes. Expects `Data<dyn RequestRewrite>` and
/// `Data<dyn HealthCheck>` to be registered as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics_text)).service(
        web::scope("/api/v1")
            .route("/rewrite", web::post().to(rewrite_request))
            .route("/health", web::get().to(health))
            .route("/health/live", web::get().to(live))
            .route("/health/ready", web::get().to(ready)),
    );
}
