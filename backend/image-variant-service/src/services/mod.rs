/// Business logic layer for image-variant-service
///
/// This module contains:
/// - Storage: blob store trait and the S3 implementation
/// - Transform: resizing originals into variants
/// - Variant: the decision pipeline tying them together
pub mod storage;
pub mod transform;
pub mod variant;

pub use storage::{BlobStore, S3BlobStore};
pub use transform::{ImageProcessor, Transformer};
pub use variant::{RequestRewrite, VariantResolver, VariantRewriter};
