/// Error types for the image variant service
///
/// Store and transform failures propagate up to the request rewriter, which logs
/// them and degrades to serving the original image. Nothing here is ever turned
/// into a user-facing error response.
use thiserror::Error;

/// Result type for variant pipeline operations
pub type Result<T> = std::result::Result<T, VariantError>;

/// Failures talking to the object store.
///
/// Absence of an object is not an error: `exists` returns `false` and `get`
/// returns `None` for that case.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to check existence of {key}: {message}")]
    Head { key: String, message: String },

    #[error("Failed to fetch {key}: {message}")]
    Get { key: String, message: String },

    #[error("Failed to read body of {key}: {message}")]
    Body { key: String, message: String },

    #[error("Failed to store {key}: {message}")]
    Put { key: String, message: String },

    #[error("Bucket {bucket} is unreachable: {message}")]
    Unreachable { bucket: String, message: String },
}

/// Failures turning original bytes into a resized variant.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Image dimensions could not be determined")]
    NoDimensions,

    #[error("Failed to encode {format} image: {message}")]
    Encode { format: &'static str, message: String },

    #[error("Resize task failed: {0}")]
    TaskFailed(String),
}

/// Any failure that escapes the variant resolver
#[derive(Debug, Error)]
pub enum VariantError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl VariantError {
    /// Short label used for log fields and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            VariantError::Store(_) => "store",
            VariantError::Transform(_) => "transform",
        }
    }
}

/// Invalid deployment configuration; aborts startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
