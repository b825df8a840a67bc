//! Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use image_variant_service::error::{StoreError, TransformError};
use image_variant_service::models::ImageBlob;
use image_variant_service::services::variant::SizePolicy;
use image_variant_service::services::{
    BlobStore, ImageProcessor, Transformer, VariantResolver, VariantRewriter,
};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ALLOWED_SIZES: [u32; 3] = [300, 600, 1200];

/// In-memory blob store counting every call
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<HashMap<String, ImageBlob>>,
    pub exists_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, blob: ImageBlob) {
        self.objects.lock().unwrap().insert(key.to_string(), blob);
    }

    pub fn object(&self, key: &str) -> Option<ImageBlob> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn total_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
            + self.get_calls.load(Ordering::SeqCst)
            + self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for InMemoryStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<ImageBlob>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.object(key))
    }

    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.insert(key, ImageBlob::new(bytes, content_type));
        Ok(())
    }
}

/// Blob store whose existence check never returns in time
pub struct StalledStore {
    pub delay: Duration,
    pub put_calls: AtomicUsize,
}

#[async_trait]
impl BlobStore for StalledStore {
    async fn exists(&self, _key: &str) -> Result<bool, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(false)
    }

    async fn get(&self, _key: &str) -> Result<Option<ImageBlob>, StoreError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _bytes: Bytes, _content_type: &str) -> Result<(), StoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Real image processor that counts invocations
#[derive(Default)]
pub struct CountingTransformer {
    inner: ImageProcessor,
    pub calls: AtomicUsize,
}

impl CountingTransformer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transformer for CountingTransformer {
    fn resize(&self, bytes: &[u8], target_short_side: u32) -> Result<ImageBlob, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resize(bytes, target_short_side)
    }
}

/// Counting transformer that takes `delay` per resize
pub struct SlowTransformer {
    pub delay: Duration,
    pub inner: CountingTransformer,
}

impl SlowTransformer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: CountingTransformer::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

impl Transformer for SlowTransformer {
    fn resize(&self, bytes: &[u8], target_short_side: u32) -> Result<ImageBlob, TransformError> {
        std::thread::sleep(self.delay);
        self.inner.resize(bytes, target_short_side)
    }
}

/// Solid-color image encoded in the given format
pub fn encode_image(width: u32, height: u32, format: ImageFormat) -> Bytes {
    let img = RgbImage::from_pixel(width, height, Rgb([90, 140, 200]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    Bytes::from(buf)
}

pub fn jpeg_blob(width: u32, height: u32) -> ImageBlob {
    ImageBlob::new(encode_image(width, height, ImageFormat::Jpeg), "image/jpeg")
}

pub fn build_rewriter(
    store: Arc<dyn BlobStore>,
    transformer: Arc<dyn Transformer>,
    timeout: Duration,
) -> VariantRewriter {
    VariantRewriter::new(
        SizePolicy::new(ALLOWED_SIZES),
        VariantResolver::new(store, transformer),
        timeout,
    )
}

/// Rewriter over the given store with a counting transformer and a generous timeout
pub fn rewriter_with(store: Arc<InMemoryStore>) -> (VariantRewriter, Arc<CountingTransformer>) {
    let transformer = Arc::new(CountingTransformer::default());
    let rewriter = build_rewriter(store, transformer.clone(), Duration::from_secs(30));
    (rewriter, transformer)
}
