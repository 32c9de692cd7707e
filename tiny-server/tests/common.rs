use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use tiny_core::{
    ConversionError, Dimensions, ImageCodec, TargetFormat, Transcoded,
};
use tiny_server::{
    AppState, create_app,
    infra::config::{Config, UploadConfig},
};

/// Codec that rejects everything, for exercising the 500 path with input
/// the real codec would accept.
#[derive(Debug)]
pub struct FailingCodec;

impl ImageCodec for FailingCodec {
    fn transcode(
        &self,
        _bytes: &[u8],
        _target: TargetFormat,
    ) -> tiny_core::Result<Transcoded> {
        Err(ConversionError::Decode("codec unavailable".into()))
    }

    fn dimensions(&self, _bytes: &[u8]) -> tiny_core::Result<Dimensions> {
        Err(ConversionError::Probe("codec unavailable".into()))
    }
}

pub fn test_config() -> Config {
    Config::default()
}

// Code is used by test modules, but not in this scope
#[allow(unused)]
pub fn config_with_upload_limit(max_bytes: usize) -> Config {
    Config {
        upload: UploadConfig { max_bytes },
        ..Config::default()
    }
}

pub fn build_server(state: AppState) -> Result<TestServer> {
    TestServer::builder()
        .mock_transport()
        .build(create_app(state))
        .map_err(|err| anyhow!(err.to_string()))
}

pub fn default_server() -> Result<TestServer> {
    build_server(AppState::new(Arc::new(test_config())))
}

#[allow(unused)]
pub fn server_with_codec(codec: Arc<dyn ImageCodec>) -> Result<TestServer> {
    build_server(AppState::with_codec(Arc::new(test_config()), codec))
}

#[allow(unused)]
pub fn webp_upload(bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes)
            .file_name("photo.webp")
            .mime_type("image/webp"),
    )
}
