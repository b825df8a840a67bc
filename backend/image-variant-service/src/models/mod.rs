/// Data models shared across the variant pipeline
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Request descriptor handed over by the CDN trigger.
///
/// Only `uri` and `querystring` are interpreted; every other field the edge
/// sends along (method, headers, client IP, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdnRequest {
    pub uri: String,
    #[serde(default)]
    pub querystring: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CdnRequest {
    pub fn new(uri: impl Into<String>, querystring: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            querystring: querystring.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Raw image bytes together with their content type
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlob {
    pub bytes: Bytes,
    pub content_type: String,
}

impl ImageBlob {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }
}
