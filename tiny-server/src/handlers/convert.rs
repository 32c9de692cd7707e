use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
    },
};
use tracing::{error, info, warn};

use tiny_core::{ConversionError, detect_content_type};
use tiny_model::{ConvertResponse, UPLOAD_FIELD};

use crate::{
    AppState,
    errors::{ApiError, ApiResult},
};

/// An uploaded file as received, before any decoding.
#[derive(Debug)]
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// `POST /api/tiny-image-convertor`
///
/// Expects a multipart body with the image in the `file` field and answers
/// with the image wrapped in an SVG data URI.
pub async fn convert_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ConvertResponse>> {
    let mut multipart = multipart?;

    let Some(upload) = read_upload(&mut multipart).await? else {
        warn!("conversion request without a `{UPLOAD_FIELD}` field");
        return Err(ApiError::no_file_uploaded());
    };

    let sniffed = detect_content_type(&upload.bytes);
    if let Some(declared) = upload.content_type.as_deref()
        && sniffed.is_some_and(|sniffed| sniffed != declared)
    {
        warn!(
            file_name = ?upload.file_name,
            declared,
            sniffed = ?sniffed,
            "declared content type does not match file contents"
        );
    }

    let converter = state.converter();
    let bytes = upload.bytes.clone();
    let result = tokio::task::spawn_blocking(move || converter.convert(&bytes))
        .await
        .map_err(|err| {
            ConversionError::Task(format!("failed to join conversion task: {err}"))
        })
        .and_then(|conversion| conversion);

    match result {
        Ok(conversion) => {
            info!(
                file_name = ?upload.file_name,
                upload_bytes = upload.bytes.len(),
                dimensions = %conversion.dimensions,
                png_bytes = conversion.png_len,
                "converted upload to SVG"
            );
            Ok(Json(ConvertResponse {
                converted_image: conversion.data_uri,
            }))
        }
        Err(err) => {
            error!(
                file_name = ?upload.file_name,
                upload_bytes = upload.bytes.len(),
                error = %err,
                "image conversion failed"
            );
            Err(ApiError::conversion_failed(&err))
        }
    }
}

/// Returns the first `file` field. Fields before it are skipped, fields
/// after it are never read.
async fn read_upload(multipart: &mut Multipart) -> ApiResult<Option<Upload>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;

        return Ok(Some(Upload {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}
