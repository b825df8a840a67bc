//! Variant resolver - finds or produces the variant for a path and size
//!
//! Workflow on a cache miss:
//! 1. Fetch the original from the blob store
//! 2. Resize it on a blocking thread
//! 3. Store the variant under its canonical key
//!
//! Steps 1-3 run in their own task, so a caller that stops waiting does not
//! abandon a half-finished variant.
//!
//! Concurrent resolutions of the same pair may both miss and both write. The
//! output is deterministic, so the duplicate write is harmless and no locking is
//! done.

use super::keyer::{is_variant_path, key_for, storage_key, VariantKey};
use crate::error::{Result, TransformError};
use crate::metrics;
use crate::services::storage::BlobStore;
use crate::services::transform::Transformer;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Where a request should be served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLocation {
    /// Variant was already stored (or the path is a variant itself)
    Existing(String),
    /// Original does not exist
    Unavailable,
    /// Variant was produced and stored by this call
    Created(String),
}

/// Orchestrates existence check, fetch, resize and store
#[derive(Clone)]
pub struct VariantResolver {
    store: Arc<dyn BlobStore>,
    transformer: Arc<dyn Transformer>,
}

impl VariantResolver {
    pub fn new(store: Arc<dyn BlobStore>, transformer: Arc<dyn Transformer>) -> Self {
        Self { store, transformer }
    }

    pub async fn resolve(&self, path: &str, size: u32) -> Result<ResolvedLocation> {
        let path = storage_key(path);

        if is_variant_path(path) {
            return Ok(ResolvedLocation::Existing(path.to_string()));
        }

        let key = key_for(path, size);

        if self.store.exists(key.as_str()).await? {
            debug!(key = %key, "Variant already stored");
            return Ok(ResolvedLocation::Existing(key.into_string()));
        }

        // Runs to completion even when the caller stops waiting
        let resolver = self.clone();
        let original_path = path.to_string();
        tokio::spawn(async move { resolver.create(&original_path, key, size).await })
            .await
            .map_err(|e| TransformError::TaskFailed(e.to_string()))?
    }

    /// Fetch the original, resize it and store the variant
    async fn create(&self, path: &str, key: VariantKey, size: u32) -> Result<ResolvedLocation> {
        let Some(original) = self.store.get(path).await? else {
            debug!(path = %path, "Original not found");
            return Ok(ResolvedLocation::Unavailable);
        };

        let started = Instant::now();
        let transformer = Arc::clone(&self.transformer);
        let bytes = original.bytes;
        let blob = tokio::task::spawn_blocking(move || transformer.resize(&bytes, size))
            .await
            .map_err(|e| TransformError::TaskFailed(e.to_string()))??;
        metrics::observe_transform(started.elapsed().as_secs_f64());

        self.store
            .put(key.as_str(), blob.bytes.clone(), &blob.content_type)
            .await?;

        info!(
            path = %path,
            key = %key,
            size,
            bytes = blob.bytes.len(),
            content_type = %blob.content_type,
            "Variant created"
        );

        Ok(ResolvedLocation::Created(key.into_string()))
    }
}
