/// Health handlers for Kubernetes liveness and readiness checks and the Prometheus scrape endpoint
use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use tracing::warn;

use crate::error::StoreError;
use crate::metrics;
use crate::services::S3BlobStore;

/// Dependency check backing the readiness endpoint
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl HealthCheck for S3BlobStore {
    async fn check(&self) -> Result<(), StoreError> {
        self.health_check().await
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

pub async fn live() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Ready once the bucket is reachable
pub async fn ready(check: web::Data<dyn HealthCheck>) -> HttpResponse {
    match check.check().await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable()
                .json(serde_json::json!({"status": "unavailable", "error": e.to_string()}))
        }
    }
}

pub async fn metrics_text() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::gather())
}
