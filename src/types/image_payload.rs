use crate::error::TaggerError;
use bytes::Bytes;
use image::{
    DynamicImage, ImageError,
    codecs::jpeg::JpegEncoder,
    error::{LimitError, LimitErrorKind},
};
use std::path::Path;

// Frame header dimensions are 16 bit.
const JPEG_MAX_DIMENSION: u32 = u16::MAX as u32;

/// Image handed to the uploader, either already JPEG encoded or decoded
/// pixels that still need compressing.
#[derive(Debug, Clone)]
pub enum ImagePayload {
    Jpeg(Bytes),
    Image(DynamicImage),
}

impl ImagePayload {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TaggerError> {
        let image = image::open(path)?;
        Ok(Self::Image(image))
    }

    /// JPEG bytes for the multipart body. `quality` is in 1..=100.
    pub fn into_jpeg(self, quality: u8) -> Result<Bytes, TaggerError> {
        match self {
            ImagePayload::Jpeg(bytes) => Ok(bytes),
            ImagePayload::Image(image) => {
                if image.width() > JPEG_MAX_DIMENSION || image.height() > JPEG_MAX_DIMENSION {
                    return Err(ImageError::Limits(LimitError::from_kind(
                        LimitErrorKind::DimensionError,
                    ))
                    .into());
                }
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                let mut buffer = Vec::new();
                let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
                rgb.write_with_encoder(encoder)?;
                Ok(Bytes::from(buffer))
            }
        }
    }
}

impl From<DynamicImage> for ImagePayload {
    fn from(image: DynamicImage) -> Self {
        Self::Image(image)
    }
}
