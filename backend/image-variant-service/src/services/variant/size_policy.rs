//! Size policy - decides whether a requested size is served as a variant
//!
//! Validity is membership in the deploy-time allowed set. Anything else,
//! including a missing or malformed token, falls back to the original image.

use std::collections::BTreeSet;

/// Outcome of validating a size token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeDecision {
    /// Serve the original, no transform
    Passthrough,
    /// Serve a variant whose short side is at most `size` pixels
    Resize(u32),
}

/// Immutable set of sizes a request may ask for
#[derive(Debug, Clone)]
pub struct SizePolicy {
    allowed: BTreeSet<u32>,
}

impl SizePolicy {
    pub fn new(allowed: impl IntoIterator<Item = u32>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Validate a raw size token. Never fails.
    pub fn normalize(&self, token: Option<&str>) -> SizeDecision {
        let Some(token) = token else {
            return SizeDecision::Passthrough;
        };

        match token.parse::<u32>() {
            Ok(size) if self.allowed.contains(&size) => SizeDecision::Resize(size),
            _ => SizeDecision::Passthrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SizePolicy {
        SizePolicy::new([300, 600, 1200])
    }

    #[test]
    fn test_absent_token_passes_through() {
        assert_eq!(policy().normalize(None), SizeDecision::Passthrough);
    }

    #[test]
    fn test_allowed_size_resizes() {
        assert_eq!(policy().normalize(Some("600")), SizeDecision::Resize(600));
        assert_eq!(policy().normalize(Some("1200")), SizeDecision::Resize(1200));
    }

    #[test]
    fn test_disallowed_size_passes_through() {
        assert_eq!(policy().normalize(Some("601")), SizeDecision::Passthrough);
        assert_eq!(policy().normalize(Some("0")), SizeDecision::Passthrough);
    }

    #[test]
    fn test_malformed_tokens_pass_through() {
        for token in ["", "abc", "600px", "-300", "6e2", " 600", "99999999999999999999"] {
            assert_eq!(
                policy().normalize(Some(token)),
                SizeDecision::Passthrough,
                "token {token:?}"
            );
        }
    }
}
