//! Blob storage for originals and variants
//!
//! All operations are scoped to one fixed bucket. Object absence is reported as
//! a value (`false` / `None`), never as an error.

pub mod s3;

pub use s3::{get_s3_client, S3BlobStore};

use crate::error::StoreError;
use crate::models::ImageBlob;
use async_trait::async_trait;
use bytes::Bytes;

/// Key/value blob store holding originals and their variants
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Check whether an object exists without downloading it
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Fetch an object, `None` when it does not exist
    async fn get(&self, key: &str) -> Result<Option<ImageBlob>, StoreError>;

    /// Write an object in a single whole-object request
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StoreError>;
}
