//! Variant keys - `resized/<size>/<original-key>`
//!
//! The reserved prefix keeps the variant key space disjoint from originals, and
//! any path already under it is never reprocessed.

use std::fmt;

/// Reserved prefix under which all variants are stored
pub const VARIANT_PREFIX: &str = "resized/";

/// Canonical storage key of a resized variant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey(String);

impl VariantKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VariantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip any leading separators, turning a request URI into a storage key
pub fn storage_key(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Derive the variant key for an original path and size
pub fn key_for(path: &str, size: u32) -> VariantKey {
    VariantKey(format!("{}{}/{}", VARIANT_PREFIX, size, storage_key(path)))
}

/// True when `path` already points into the variant key space
pub fn is_variant_path(path: &str) -> bool {
    storage_key(path).starts_with(VARIANT_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_strips_leading_separator() {
        assert_eq!(key_for("/cats/a.jpg", 600).as_str(), "resized/600/cats/a.jpg");
        assert_eq!(key_for("cats/a.jpg", 600).as_str(), "resized/600/cats/a.jpg");
    }

    #[test]
    fn test_key_for_is_deterministic() {
        assert_eq!(key_for("dogs/b.png", 300), key_for("dogs/b.png", 300));
        assert_ne!(key_for("dogs/b.png", 300), key_for("dogs/b.png", 600));
    }

    #[test]
    fn test_is_variant_path() {
        assert!(is_variant_path("resized/600/cats/a.jpg"));
        assert!(is_variant_path("/resized/600/cats/a.jpg"));
        assert!(!is_variant_path("cats/a.jpg"));
        assert!(!is_variant_path("/cats/resized/a.jpg"));
        assert!(!is_variant_path("resizedcats/a.jpg"));
    }

    #[test]
    fn test_generated_keys_are_variant_paths() {
        for path in ["a.jpg", "/a.jpg", "deep/nested/path/a.webp", "resized.jpg", ""] {
            for size in [1, 300, 600, 1200] {
                assert!(is_variant_path(key_for(path, size).as_str()));
            }
        }
    }
}
