use tracing::debug;

use crate::{
    codec::{Dimensions, ImageCodec, RasterCodec, TargetFormat, Transcoded},
    data_uri,
    error::{ConversionError, Result},
    svg,
};

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// `data:image/svg+xml;base64,...`
    pub data_uri: String,
    pub dimensions: Dimensions,
    /// Size of the embedded PNG before base64 encoding.
    pub png_len: usize,
}

/// Turns an uploaded image into an SVG data URI.
///
/// The pipeline is: transcode to PNG, read the PNG's dimensions back from
/// the codec, wrap the PNG in an SVG document, base64 the document. Nothing
/// is retried and no partial result is produced.
#[derive(Debug, Clone, Default)]
pub struct SvgConverter<C = RasterCodec> {
    codec: C,
}

impl<C: ImageCodec> SvgConverter<C> {
    /// Converter backed by `codec`.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn convert(&self, bytes: &[u8]) -> Result<Conversion> {
        if bytes.is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let Transcoded {
            bytes: png,
            dimensions: raster,
        } = self.codec.transcode(bytes, TargetFormat::Png)?;

        let dimensions = self.codec.dimensions(&png)?;
        if dimensions != raster {
            return Err(ConversionError::Probe(format!(
                "encoded PNG is {dimensions} but decoded raster was {raster}"
            )));
        }

        let document = svg::wrap_png(&png, dimensions);
        let data_uri = data_uri::encode(svg::SVG_MIME, document.as_bytes());

        debug!(
            %dimensions,
            png_bytes = png.len(),
            svg_bytes = document.len(),
            "wrapped PNG in SVG"
        );

        Ok(Conversion {
            data_uri,
            dimensions,
            png_len: png.len(),
        })
    }
}
