//! Request rewriter - entry point of the variant pipeline
//!
//! Rewrites the request URI to point at a resized variant, or leaves it alone.
//! Failures anywhere in the chain are logged and degrade to serving the
//! original; the rewrite itself never fails a request.

use super::keyer::is_variant_path;
use super::resolver::{ResolvedLocation, VariantResolver};
use super::size_policy::{SizeDecision, SizePolicy};
use crate::metrics::{self, RewriteOutcome};
use crate::models::CdnRequest;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Query parameter carrying the requested size
pub const SIZE_PARAM: &str = "s";

/// One-operation seam the CDN trigger calls into
#[async_trait]
pub trait RequestRewrite: Send + Sync {
    async fn rewrite(&self, request: CdnRequest) -> CdnRequest;
}

/// Extract the first `s` parameter from a raw query string
pub fn size_token(querystring: &str) -> Option<String> {
    url::form_urlencoded::parse(querystring.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == SIZE_PARAM)
        .map(|(_, value)| value.into_owned())
}

#[derive(Clone)]
pub struct VariantRewriter {
    policy: SizePolicy,
    resolver: VariantResolver,
    timeout: Duration,
}

impl VariantRewriter {
    pub fn new(policy: SizePolicy, resolver: VariantResolver, timeout: Duration) -> Self {
        Self {
            policy,
            resolver,
            timeout,
        }
    }

    /// Compute the outgoing path for an incoming path and query string
    pub async fn handle(&self, incoming_path: &str, querystring: &str) -> String {
        let (outgoing, outcome) = self.decide(incoming_path, querystring).await;
        metrics::record_rewrite(outcome);
        outgoing
    }

    async fn decide(&self, incoming_path: &str, querystring: &str) -> (String, RewriteOutcome) {
        let passthrough = || incoming_path.to_string();

        if is_variant_path(incoming_path) {
            return (passthrough(), RewriteOutcome::Passthrough);
        }

        let size = match self.policy.normalize(size_token(querystring).as_deref()) {
            SizeDecision::Passthrough => return (passthrough(), RewriteOutcome::Passthrough),
            SizeDecision::Resize(size) => size,
        };

        let resolved =
            match tokio::time::timeout(self.timeout, self.resolver.resolve(incoming_path, size))
                .await
            {
                Ok(resolved) => resolved,
                Err(_) => {
                    warn!(
                        path = %incoming_path,
                        size,
                        timeout_ms = self.timeout.as_millis() as u64,
                        "Variant resolution timed out, serving original"
                    );
                    return (passthrough(), RewriteOutcome::Timeout);
                }
            };

        match resolved {
            Ok(ResolvedLocation::Existing(key)) => {
                debug!(path = %incoming_path, key = %key, "Serving existing variant");
                (format!("/{key}"), RewriteOutcome::Existing)
            }
            Ok(ResolvedLocation::Created(key)) => (format!("/{key}"), RewriteOutcome::Created),
            Ok(ResolvedLocation::Unavailable) => (passthrough(), RewriteOutcome::Unavailable),
            Err(e) => {
                error!(
                    path = %incoming_path,
                    size,
                    kind = e.kind(),
                    error = %e,
                    "Variant resolution failed, serving original"
                );
                (passthrough(), RewriteOutcome::Error)
            }
        }
    }
}

#[async_trait]
impl RequestRewrite for VariantRewriter {
    async fn rewrite(&self, mut request: CdnRequest) -> CdnRequest {
        request.uri = self.handle(&request.uri, &request.querystring).await;
        request
    }
}
