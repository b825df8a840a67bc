//! Image Variant Service
//!
//! Sits in the CDN request path and rewrites requests carrying a size hint to a
//! resized variant, producing and storing the variant on first use.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{Result, VariantError};
