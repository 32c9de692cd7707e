//! # Tiny Client
//!
//! Upload client for the tiny tools converter.
//!
//! [`ConverterState`] holds what a converter form shows: the selected file,
//! whether a request is in flight, progress, the last error and the last
//! result. [`Converter`] drives one conversion at a time through a
//! [`ConversionApi`] and hands the result to a [`DownloadSink`] under the
//! original name with its extension swapped to `.svg`.

#![allow(missing_docs)]

pub mod api;
pub mod converter;
pub mod download;
pub mod state;

pub use api::{ClientError, ConversionApi, HttpConversionApi};
pub use converter::{ConvertFlowError, Converter};
pub use download::{DirectoryDownloadSink, DownloadError, DownloadSink};
pub use state::{ConverterState, Phase, SelectedFile, SelectionError};
