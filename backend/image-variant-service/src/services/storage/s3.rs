/// S3-backed blob store
///
/// Originals are read from and variants written to the same bucket. Variants are
/// stored with a long-lived cache directive since the content at a variant key
/// never changes.
use super::BlobStore;
use crate::config::S3Config;
use crate::error::StoreError;
use crate::models::ImageBlob;
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::debug;

/// Content type assumed for objects stored without one
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    cache_control: String,
}

impl S3BlobStore {
    pub fn new(
        client: Client,
        bucket: impl Into<String>,
        cache_control: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            cache_control: cache_control.into(),
        }
    }

    /// Health check for bucket connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable {
                bucket: self.bucket.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        // HeadObject avoids downloading the object
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(StoreError::Head {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            }),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<ImageBlob>, StoreError> {
        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                return Ok(None)
            }
            Err(e) => {
                return Err(StoreError::Get {
                    key: key.to_string(),
                    message: DisplayErrorContext(&e).to_string(),
                })
            }
        };

        let content_type = response
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Body {
                key: key.to_string(),
                message: e.to_string(),
            })?
            .into_bytes();

        debug!(key = %key, size = bytes.len(), "Fetched object");

        Ok(Some(ImageBlob::new(bytes, content_type)))
    }

    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StoreError> {
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .cache_control(&self.cache_control)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StoreError::Put {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!(key = %key, size, content_type = %content_type, "Stored object");

        Ok(())
    }
}

/// Initialize AWS S3 client from config
///
/// Explicit credentials are used when both halves are configured, otherwise the
/// default credential chain applies. A custom endpoint enables S3-compatible
/// stores such as MinIO.
pub async fn get_s3_client(config: &S3Config) -> Client {
    use aws_sdk_s3::config::{Credentials, Region};

    let mut aws_config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));

    if let (Some(access_key_id), Some(secret_access_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "image_variant_service_s3",
        );

        aws_config_builder = aws_config_builder.credentials_provider(credentials);
    }

    if let Some(endpoint) = &config.endpoint {
        aws_config_builder = aws_config_builder.endpoint_url(endpoint);
    }

    let aws_config = aws_config_builder.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(config.force_path_style)
        .build();

    Client::from_conf(s3_config)
}
