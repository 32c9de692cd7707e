#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Multipart field that carries the uploaded image.
pub const UPLOAD_FIELD: &str = "file";

pub const NO_FILE_UPLOADED: &str = "No file uploaded";
pub const CONVERSION_FAILED: &str = "Conversion failed";
pub const INVALID_MULTIPART: &str = "Invalid multipart request";
pub const UPLOAD_TOO_LARGE: &str = "Upload too large";

/// Message the client surfaces for any transport or status failure.
pub const CLIENT_CONVERSION_FAILED: &str = "Failed to convert image";

/// Successful conversion payload.
///
/// `converted_image` is a `data:image/svg+xml;base64,...` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConvertResponse {
    pub converted_image: String,
}

/// Error body returned by every failing API route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
