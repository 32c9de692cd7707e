use axum::http::{HeaderValue, Method, header::HeaderName};
use thiserror::Error;

use super::models::{Config, CorsConfig, UploadConfig};

/// Above this the server still starts, but operators are told that every
/// in-flight upload is held in memory in full.
pub const LARGE_UPLOAD_WARNING_BYTES: usize = 100 * 1024 * 1024;

const LARGE_UPLOAD_WARNING_PREFIX: &str = "MAX_UPLOAD_BYTES is";

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("MAX_UPLOAD_BYTES must be greater than zero")]
    ZeroUploadLimit,
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_upload(&config.upload, &mut warnings)?;

    if !config.dev_mode && config.cors.is_wildcard_included() {
        return Err(ConfigGuardRailError::DangerousCorsWildcard);
    }

    validate_cors(&config.cors, config.dev_mode)?;

    if config.cors.allow_credentials && config.cors.is_wildcard_included() {
        warnings.push(
            "CORS credentials allowed alongside wildcard origin; browsers will reject such configuration",
        );
    }

    Ok(warnings)
}

/// Re-checks the upload limit after it was overridden on top of a loaded
/// config. Warnings raised for the previous limit are replaced.
pub fn revalidate_upload(
    upload: &UploadConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    warnings
        .items
        .retain(|w| !w.message.starts_with(LARGE_UPLOAD_WARNING_PREFIX));
    validate_upload(upload, warnings)
}

fn validate_upload(
    upload: &UploadConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if upload.max_bytes == 0 {
        return Err(ConfigGuardRailError::ZeroUploadLimit);
    }

    if upload.max_bytes > LARGE_UPLOAD_WARNING_BYTES {
        warnings.push_with_hint(
            format!(
                "{LARGE_UPLOAD_WARNING_PREFIX} {} bytes; uploads are buffered in memory before conversion",
                upload.max_bytes
            ),
            "Lower MAX_UPLOAD_BYTES unless the host has memory to spare for concurrent uploads",
        );
    }

    Ok(())
}

fn validate_cors(
    cors: &CorsConfig,
    dev_mode: bool,
) -> Result<(), ConfigGuardRailError> {
    // Dev mode serves permissive CORS and never reads the origin list.
    if !dev_mode {
        validate_origins(&cors.allowed_origins)?;
    }

    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_METHODS must include at least one HTTP method"
                    .into(),
        });
    }

    for method in &cors.allowed_methods {
        Method::from_bytes(method.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid HTTP method `{}` in CORS_ALLOWED_METHODS",
                    method
                ),
            }
        })?;
    }

    for header in &cors.allowed_headers {
        HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid header name `{}` in CORS_ALLOWED_HEADERS",
                    header
                ),
            }
        })?;
    }

    Ok(())
}

fn validate_origins(origins: &[String]) -> Result<(), ConfigGuardRailError> {
    let mut configured = 0;
    for origin in origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty() && *o != "*")
    {
        HeaderValue::from_str(origin).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid origin `{}` in CORS_ALLOWED_ORIGINS",
                    origin
                ),
            }
        })?;
        configured += 1;
    }

    if configured == 0 {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_ORIGINS must list at least one origin when DEV_MODE is false".into(),
        });
    }

    Ok(())
}
