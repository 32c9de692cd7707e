//! # Tiny Core
//!
//! Request-independent logic behind the tiny tools image converter.
//!
//! ## Overview
//!
//! A conversion takes the raw bytes of an uploaded image and produces a
//! `data:image/svg+xml;base64,...` URI. The SVG document wraps a PNG
//! re-encoding of the upload in a single `<image>` element whose size and
//! the document `viewBox` match the decoded raster.
//!
//! - [`codec`]: the narrow codec capability ([`ImageCodec`]) and its
//!   implementation over the `image` crate ([`RasterCodec`])
//! - [`convert`]: the decode, re-encode and wrap pipeline ([`SvgConverter`])
//! - [`svg`]: the SVG wrapper document
//! - [`data_uri`]: data URI encoding and parsing
//! - [`filename`]: download name derivation for converted files
//! - [`sniff`]: magic-byte content type detection
//!
//! ## Feature Flags
//!
//! - `test-utils`: exposes [`fixtures`] for building encoded test images
//!
//! ## Examples
//!
//! ```no_run
//! use tiny_core::{RasterCodec, SvgConverter};
//!
//! let bytes = std::fs::read("photo.webp").unwrap();
//! let converter = SvgConverter::new(RasterCodec::default());
//! let conversion = converter.convert(&bytes).unwrap();
//! assert!(conversion.data_uri.starts_with("data:image/svg+xml;base64,"));
//! ```

#![allow(missing_docs)]

pub mod codec;
pub mod convert;
pub mod data_uri;
pub mod error;
pub mod filename;
pub mod sniff;
pub mod svg;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use codec::{Dimensions, ImageCodec, RasterCodec, TargetFormat, Transcoded};
pub use convert::{Conversion, SvgConverter};
pub use data_uri::{DataUri, DataUriError};
pub use error::{ConversionError, Result};
pub use filename::svg_file_name;
pub use sniff::detect_content_type;
