/// Prometheus metrics for the variant pipeline
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

static REWRITES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "image_variant_rewrites_total",
        "Total number of rewrite decisions by outcome",
        &["outcome"]
    )
    .expect("Failed to register rewrites metric")
});

static TRANSFORM_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "image_variant_transform_duration_seconds",
        "Time spent resizing an original into a variant",
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register transform duration metric")
});

/// How a single rewrite ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    Passthrough,
    Existing,
    Created,
    Unavailable,
    Error,
    Timeout,
}

impl RewriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteOutcome::Passthrough => "passthrough",
            RewriteOutcome::Existing => "existing",
            RewriteOutcome::Created => "created",
            RewriteOutcome::Unavailable => "unavailable",
            RewriteOutcome::Error => "error",
            RewriteOutcome::Timeout => "timeout",
        }
    }
}

pub fn record_rewrite(outcome: RewriteOutcome) {
    REWRITES.with_label_values(&[outcome.as_str()]).inc();
}

pub fn observe_transform(duration_secs: f64) {
    TRANSFORM_DURATION.observe(duration_secs);
}

/// Render every registered metric in the Prometheus text format
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
