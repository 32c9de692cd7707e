use std::sync::Arc;

use anyhow::Result;
use axum::http::{
    HeaderName, HeaderValue, Method,
    header::{
        ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
    },
};
use tiny_model::routes;
use tiny_server::{
    AppState,
    infra::config::{Config, CorsConfig},
};

mod common;
use common::build_server;

fn config_with_origins(origins: Vec<String>, credentials: bool) -> Config {
    let mut config = Config::default();
    config.cors = CorsConfig {
        allowed_origins: origins,
        allow_credentials: credentials,
        ..CorsConfig::default()
    };
    config
}

async fn preflight(
    config: Config,
    origin: &'static str,
) -> Result<axum_test::TestResponse> {
    let server = build_server(AppState::new(Arc::new(config)))?;
    Ok(server
        .method(Method::OPTIONS, routes::CONVERT)
        .add_header(ORIGIN, HeaderValue::from_static(origin))
        .add_header(
            ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await)
}

fn header<'a>(
    response: &'a axum_test::TestResponse,
    name: &HeaderName,
) -> Option<&'a HeaderValue> {
    response.headers().get(name)
}

#[tokio::test]
async fn allow_listed_origin_is_echoed() -> Result<()> {
    let response = preflight(
        config_with_origins(vec!["http://localhost:3000".into()], false),
        "http://localhost:3000",
    )
    .await?;

    assert_eq!(
        header(&response, &ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("http://localhost:3000"))
    );
    Ok(())
}

#[tokio::test]
async fn unlisted_origin_gets_no_allow_header() -> Result<()> {
    let response = preflight(
        config_with_origins(vec!["http://localhost:3000".into()], false),
        "https://evil.example",
    )
    .await?;

    assert!(header(&response, &ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    Ok(())
}

#[tokio::test]
async fn empty_origin_list_denies_every_origin() -> Result<()> {
    let response =
        preflight(config_with_origins(Vec::new(), false), "https://evil.example")
            .await?;

    assert!(header(&response, &ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    Ok(())
}

#[tokio::test]
async fn empty_origin_list_with_credentials_still_builds() -> Result<()> {
    let response =
        preflight(config_with_origins(Vec::new(), true), "https://evil.example")
            .await?;

    assert!(header(&response, &ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    Ok(())
}
