//! Variant pipeline
//!
//! - Size policy validating the requested size
//! - Keyer deriving `resized/<size>/<path>` storage keys
//! - Resolver finding or producing a stored variant
//! - Rewriter turning a CDN request into its outgoing URI

pub mod keyer;
pub mod resolver;
pub mod rewriter;
pub mod size_policy;

pub use keyer::{is_variant_path, key_for, VariantKey, VARIANT_PREFIX};
pub use resolver::{ResolvedLocation, VariantResolver};
pub use rewriter::{size_token, RequestRewrite, VariantRewriter, SIZE_PARAM};
pub use size_policy::{SizeDecision, SizePolicy};
