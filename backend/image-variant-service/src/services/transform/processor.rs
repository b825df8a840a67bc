//! Image processor - generates resized variants from original images
//!
//! Scales an image so its short side matches the requested size while keeping
//! the aspect ratio, and re-encodes it in the detected source format. Formats
//! other than PNG, WebP and GIF are encoded as JPEG with configurable quality.
//! Images are never enlarged.

use super::Transformer;
use crate::error::TransformError;
use crate::models::ImageBlob;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::debug;

/// Dimensions and format read from the source bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl SourceMetadata {
    /// Read format and dimensions without decoding pixel data
    pub fn read(bytes: &[u8]) -> Result<Self, TransformError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| TransformError::Decode(e.to_string()))?;

        let format = reader
            .format()
            .ok_or_else(|| TransformError::Decode("unrecognized image format".to_string()))?;

        let (width, height) = reader
            .into_dimensions()
            .map_err(|_| TransformError::NoDimensions)?;

        if width == 0 || height == 0 {
            return Err(TransformError::NoDimensions);
        }

        Ok(Self {
            width,
            height,
            format,
        })
    }
}

/// Content type of the variant produced for a source format
pub fn content_type_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Gif => "image/gif",
        _ => "image/jpeg",
    }
}

/// Scale `width`x`height` so the short side becomes `target_short_side`.
///
/// Returns the original dimensions when that would enlarge the image.
pub fn target_dimensions(width: u32, height: u32, target_short_side: u32) -> (u32, u32) {
    let short_side = width.min(height);
    if short_side == 0 {
        return (width, height);
    }

    let ratio = f64::from(target_short_side) / f64::from(short_side);
    if ratio >= 1.0 {
        return (width, height);
    }

    let new_w = (f64::from(width) * ratio).round() as u32;
    let new_h = (f64::from(height) * ratio).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Image processor backed by the `image` crate
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    jpeg_quality: u8,
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self { jpeg_quality: 85 }
    }
}

impl ImageProcessor {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    fn encode(&self, img: &DynamicImage, format: ImageFormat) -> Result<Bytes, TransformError> {
        let mut buf = Vec::new();

        let (label, result) = match format {
            ImageFormat::Png => ("png", img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)),
            // WebP and GIF encoders only accept 8-bit RGB(A)
            ImageFormat::WebP => (
                "webp",
                DynamicImage::ImageRgba8(img.to_rgba8())
                    .write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP),
            ),
            ImageFormat::Gif => (
                "gif",
                DynamicImage::ImageRgba8(img.to_rgba8())
                    .write_to(&mut Cursor::new(&mut buf), ImageFormat::Gif),
            ),
            _ => {
                // JPEG has no alpha channel
                let encoder = JpegEncoder::new_with_quality(&mut buf, self.jpeg_quality);
                ("jpeg", DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder))
            }
        };

        result.map_err(|e| TransformError::Encode {
            format: label,
            message: e.to_string(),
        })?;

        Ok(Bytes::from(buf))
    }
}

impl Transformer for ImageProcessor {
    fn resize(&self, bytes: &[u8], target_short_side: u32) -> Result<ImageBlob, TransformError> {
        let meta = SourceMetadata::read(bytes)?;

        debug!(
            original_width = meta.width,
            original_height = meta.height,
            format = ?meta.format,
            target_short_side,
            "Processing image for variant"
        );

        let img = image::load_from_memory_with_format(bytes, meta.format)
            .map_err(|e| TransformError::Decode(e.to_string()))?;

        let (new_w, new_h) = target_dimensions(meta.width, meta.height, target_short_side);

        let resized = if (new_w, new_h) == (meta.width, meta.height) {
            debug!("Image already within target size, encoding as-is");
            img
        } else {
            img.resize_exact(new_w, new_h, FilterType::Lanczos3)
        };

        let data = self.encode(&resized, meta.format)?;
        let content_type = content_type_for(meta.format);

        debug!(
            width = new_w,
            height = new_h,
            size = data.len(),
            content_type,
            "Variant generated"
        );

        Ok(ImageBlob::new(data, content_type))
    }
}
