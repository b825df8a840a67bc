//! Image transformation
//!
//! - Transformer trait consumed by the variant resolver
//! - Image processor that resizes with the `image` crate

pub mod processor;

pub use processor::{content_type_for, target_dimensions, ImageProcessor, SourceMetadata};

use crate::error::TransformError;
use crate::models::ImageBlob;

/// Produces a resized copy of an image.
///
/// CPU-bound and synchronous; callers run it on a blocking thread.
pub trait Transformer: Send + Sync {
    /// Resize so the short side is at most `target_short_side`, never enlarging
    fn resize(&self, bytes: &[u8], target_short_side: u32) -> Result<ImageBlob, TransformError>;
}
