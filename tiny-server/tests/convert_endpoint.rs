use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};
use tiny_core::{DataUri, fixtures};
use tiny_model::{
    CONVERSION_FAILED, ConvertResponse, INVALID_MULTIPART, UPLOAD_TOO_LARGE,
    routes,
};
use tiny_server::AppState;

mod common;
use common::{
    FailingCodec, build_server, config_with_upload_limit, default_server,
    server_with_codec, webp_upload,
};

fn decode_svg(response: &ConvertResponse) -> String {
    let uri = DataUri::parse(&response.converted_image).unwrap();
    assert_eq!(uri.mime, "image/svg+xml");
    String::from_utf8(uri.data).unwrap()
}

#[tokio::test]
async fn converts_webp_upload_to_svg_data_uri() -> Result<()> {
    let server = default_server()?;

    let response = server
        .post(routes::CONVERT)
        .multipart(webp_upload(fixtures::webp(40, 24)))
        .await;

    response.assert_status_ok();
    let body: ConvertResponse = response.json();
    assert!(body.converted_image.starts_with("data:image/svg+xml;base64,"));

    let svg = decode_svg(&body);
    assert!(svg.contains(r#"viewBox="0 0 40 24""#), "{svg}");
    assert!(svg.contains(r#"width="40" height="24""#), "{svg}");
    assert!(svg.contains("data:image/png;base64,"));
    Ok(())
}

#[tokio::test]
async fn response_uses_camel_case_key() -> Result<()> {
    let server = default_server()?;

    let response = server
        .post(routes::CONVERT)
        .multipart(webp_upload(fixtures::webp(4, 4)))
        .await;

    let json: Value = response.json();
    assert!(json.get("convertedImage").is_some_and(Value::is_string));
    assert_eq!(json.as_object().map(|o| o.len()), Some(1));
    Ok(())
}

#[tokio::test]
async fn same_bytes_convert_to_same_uri() -> Result<()> {
    let server = default_server()?;
    let bytes = fixtures::webp(16, 16);

    let first: ConvertResponse = server
        .post(routes::CONVERT)
        .multipart(webp_upload(bytes.clone()))
        .await
        .json();
    let second: ConvertResponse = server
        .post(routes::CONVERT)
        .multipart(webp_upload(bytes))
        .await
        .json();

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn missing_file_field_is_bad_request() -> Result<()> {
    let server = default_server()?;

    let response = server
        .post(routes::CONVERT)
        .multipart(MultipartForm::new())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "No file uploaded" }));
    Ok(())
}

#[tokio::test]
async fn other_fields_do_not_count_as_upload() -> Result<()> {
    let server = default_server()?;

    let form = MultipartForm::new().add_text("note", "no image here").add_part(
        "image",
        Part::bytes(fixtures::webp(4, 4)).file_name("photo.webp"),
    );
    let response = server.post(routes::CONVERT).multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "No file uploaded" }));
    Ok(())
}

#[tokio::test]
async fn file_field_after_other_fields_is_found() -> Result<()> {
    let server = default_server()?;

    let form = MultipartForm::new().add_text("note", "first").add_part(
        "file",
        Part::bytes(fixtures::webp(8, 6))
            .file_name("photo.webp")
            .mime_type("image/webp"),
    );
    let response = server.post(routes::CONVERT).multipart(form).await;

    response.assert_status_ok();
    let svg = decode_svg(&response.json());
    assert!(svg.contains(r#"viewBox="0 0 8 6""#));
    Ok(())
}

#[tokio::test]
async fn non_multipart_body_is_rejected() -> Result<()> {
    let server = default_server()?;

    let response = server
        .post(routes::CONVERT)
        .json(&json!({ "file": "photo.webp" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], INVALID_MULTIPART);
    assert!(json["details"].is_string());
    Ok(())
}

#[tokio::test]
async fn corrupt_upload_is_server_error_with_details() -> Result<()> {
    let server = default_server()?;

    let response = server
        .post(routes::CONVERT)
        .multipart(webp_upload(b"RIFF\0\0\0\0WEBPnot really".to_vec()))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], CONVERSION_FAILED);
    assert!(
        json["details"].as_str().is_some_and(|d| !d.is_empty()),
        "details should carry the codec message: {json}"
    );
    assert!(json.get("convertedImage").is_none());
    Ok(())
}

#[tokio::test]
async fn empty_upload_is_server_error() -> Result<()> {
    let server = default_server()?;

    let response = server
        .post(routes::CONVERT)
        .multipart(webp_upload(Vec::new()))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Conversion failed",
        "details": "uploaded file is empty"
    }));
    Ok(())
}

#[tokio::test]
async fn codec_failure_is_reported_verbatim() -> Result<()> {
    let server = server_with_codec(Arc::new(FailingCodec))?;

    let response = server
        .post(routes::CONVERT)
        .multipart(webp_upload(fixtures::webp(4, 4)))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Conversion failed",
        "details": "failed to decode image: codec unavailable"
    }));
    Ok(())
}

#[tokio::test]
async fn png_upload_is_still_converted() -> Result<()> {
    let server = default_server()?;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(fixtures::png(12, 5))
            .file_name("photo.webp")
            .mime_type("image/webp"),
    );
    let response = server.post(routes::CONVERT).multipart(form).await;

    response.assert_status_ok();
    let svg = decode_svg(&response.json());
    assert!(svg.contains(r#"viewBox="0 0 12 5""#));
    Ok(())
}

#[tokio::test]
async fn oversized_upload_is_rejected() -> Result<()> {
    let state = AppState::new(Arc::new(config_with_upload_limit(1024)));
    let server = build_server(state)?;

    let response = server
        .post(routes::CONVERT)
        .multipart(webp_upload(vec![0u8; 8 * 1024]))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = response.json();
    assert_eq!(json["error"], UPLOAD_TOO_LARGE);
    Ok(())
}
