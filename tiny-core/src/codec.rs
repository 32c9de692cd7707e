//! Codec capability used by the converter.
//!
//! The converter never touches an image library directly; it asks an
//! [`ImageCodec`] to re-encode bytes and to report raster dimensions. This
//! keeps the codec swappable and lets tests substitute a fake.

use std::{fmt, io::Cursor, sync::Arc};

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::error::{ConversionError, Result};

/// Raster size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of a `width` x `height` raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Encoded formats the codec can produce. Format negotiation is out of
/// scope, so PNG is the only target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// Lossless PNG.
    Png,
}

impl TargetFormat {
    /// MIME type used when embedding output of this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            TargetFormat::Png => "image/png",
        }
    }

    fn name(self) -> &'static str {
        match self {
            TargetFormat::Png => "PNG",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            TargetFormat::Png => ImageFormat::Png,
        }
    }
}

/// Output of [`ImageCodec::transcode`].
#[derive(Debug, Clone)]
pub struct Transcoded {
    pub bytes: Vec<u8>,
    /// Dimensions of the raster decoded from the input.
    pub dimensions: Dimensions,
}

/// Decode bytes in whatever format they are in and re-encode them.
pub trait ImageCodec: Send + Sync {
    fn transcode(&self, bytes: &[u8], target: TargetFormat)
    -> Result<Transcoded>;

    /// Read the raster size of already encoded bytes.
    fn dimensions(&self, bytes: &[u8]) -> Result<Dimensions>;
}

impl<T: ImageCodec + ?Sized> ImageCodec for Arc<T> {
    fn transcode(
        &self,
        bytes: &[u8],
        target: TargetFormat,
    ) -> Result<Transcoded> {
        (**self).transcode(bytes, target)
    }

    fn dimensions(&self, bytes: &[u8]) -> Result<Dimensions> {
        (**self).dimensions(bytes)
    }
}

/// [`ImageCodec`] backed by the `image` crate. The input format is sniffed
/// from the content, never taken from a declared MIME type or file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterCodec;

impl RasterCodec {
    fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ConversionError::Decode(e.to_string()))
    }
}

impl ImageCodec for RasterCodec {
    fn transcode(
        &self,
        bytes: &[u8],
        target: TargetFormat,
    ) -> Result<Transcoded> {
        let reader = Self::reader(bytes)?;
        let source_format = reader.format();
        let raster = reader
            .decode()
            .map_err(|e| ConversionError::Decode(e.to_string()))?;
        let dimensions = Dimensions::new(raster.width(), raster.height());

        let mut encoded = Vec::new();
        raster
            .write_to(&mut Cursor::new(&mut encoded), target.image_format())
            .map_err(|e| ConversionError::Encode {
                format: target.name(),
                message: e.to_string(),
            })?;

        debug!(
            source = ?source_format,
            target = target.name(),
            %dimensions,
            input_bytes = bytes.len(),
            output_bytes = encoded.len(),
            "transcoded image"
        );

        Ok(Transcoded {
            bytes: encoded,
            dimensions,
        })
    }

    fn dimensions(&self, bytes: &[u8]) -> Result<Dimensions> {
        let (width, height) = Self::reader(bytes)
            .map_err(|e| ConversionError::Probe(e.to_string()))?
            .into_dimensions()
            .map_err(|e| ConversionError::Probe(e.to_string()))?;
        Ok(Dimensions::new(width, height))
    }
}
