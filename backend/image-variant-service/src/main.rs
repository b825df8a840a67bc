/// Image Variant Service - HTTP Server
///
/// Receives CDN origin-request descriptors and rewrites them to resized
/// variants stored in S3.
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use image_variant_service::handlers::{self, HealthCheck};
use image_variant_service::services::storage::get_s3_client;
use image_variant_service::services::variant::SizePolicy;
use image_variant_service::services::{
    BlobStore, ImageProcessor, RequestRewrite, S3BlobStore, Transformer, VariantResolver,
    VariantRewriter,
};
use image_variant_service::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    info!(
        env = %config.app.env,
        bucket = %config.s3.bucket,
        allowed_sizes = ?config.variants.allowed_sizes,
        "Starting image-variant-service"
    );

    let s3_client = get_s3_client(&config.s3).await;
    let store = Arc::new(S3BlobStore::new(
        s3_client,
        config.s3.bucket.clone(),
        config.variants.cache_control.clone(),
    ));
    let processor: Arc<dyn Transformer> =
        Arc::new(ImageProcessor::new(config.variants.jpeg_quality));

    let resolver = VariantResolver::new(store.clone() as Arc<dyn BlobStore>, processor);
    let rewriter: Arc<dyn RequestRewrite> = Arc::new(VariantRewriter::new(
        SizePolicy::new(config.variants.allowed_sizes.iter().copied()),
        resolver,
        config.variants.resolve_timeout(),
    ));
    let health_check: Arc<dyn HealthCheck> = store;

    let rewriter_data = web::Data::from(rewriter);
    let health_data = web::Data::from(health_check);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!("image-variant-service HTTP listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(rewriter_data.clone())
            .app_data(health_data.clone())
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
