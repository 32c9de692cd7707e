//! Wire types shared across the tiny tools crates.
#![allow(missing_docs)]

pub mod api;
pub mod routes;
pub mod tools;

pub use api::{
    CLIENT_CONVERSION_FAILED, CONVERSION_FAILED, ConvertResponse,
    ErrorResponse, INVALID_MULTIPART, NO_FILE_UPLOADED, UPLOAD_FIELD,
    UPLOAD_TOO_LARGE,
};
pub use tools::{ToolSummary, tool_catalog};
