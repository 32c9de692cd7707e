//! `data:<mime>;base64,<payload>` strings.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use thiserror::Error;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI has no payload separator")]
    MissingSeparator,
    #[error("data URI payload is not base64 encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),
}

/// Encode `bytes` as a base64 data URI with the given MIME type.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("{SCHEME}{mime}{BASE64_MARKER},{}", BASE64.encode(bytes))
}

/// A decoded base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn parse(raw: &str) -> Result<Self, DataUriError> {
        let rest = raw
            .trim()
            .strip_prefix(SCHEME)
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or(DataUriError::MissingSeparator)?;
        let mime = header
            .strip_suffix(BASE64_MARKER)
            .ok_or(DataUriError::NotBase64)?;
        let data = BASE64
            .decode(payload)
            .map_err(|e| DataUriError::InvalidPayload(e.to_string()))?;

        Ok(Self {
            mime: mime.to_string(),
            data,
        })
    }
}
