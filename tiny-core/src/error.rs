use thiserror::Error;

/// Failures of a single conversion. The display text is what callers see as
/// the error details, so each variant names the step that failed.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("uploaded file is empty")]
    EmptyInput,

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("failed to read image metadata: {0}")]
    Probe(String),

    #[error("conversion task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
