use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use tiny_model::routes;

use crate::{
    AppState,
    handlers::health::{health_handler, ping_handler},
    infra::config::CorsConfig,
    routes::create_api_router,
};

pub fn create_app(state: AppState) -> Router {
    let api = create_api_router(state.clone());

    // Build CORS layer (permissive in dev, allow-list otherwise)
    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        build_cors_layer(&state.config().cors)
    };

    Router::new()
        .route(routes::PING, get(ping_handler))
        .route(routes::HEALTH, get(health_handler))
        .merge(api)
        // Outer to inner: CORS, then tracing
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    // Wildcards only pass the guard rails in dev mode. An empty list allows
    // no cross-origin requests at all.
    let wildcard = cors.is_wildcard_included();
    let allow_origin = if wildcard {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        if origins.is_empty() {
            warn!(
                "no valid CORS origins configured; \
                 cross-origin requests are denied"
            );
        }
        AllowOrigin::list(origins)
    };

    // Entries were validated during config load; anything unparsable here is
    // dropped.
    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| match Method::from_bytes(m.trim().as_bytes()) {
            Ok(method) => Some(method),
            Err(_) => {
                warn!(method = %m, "ignoring invalid CORS method");
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|h| match HeaderName::from_bytes(h.trim().as_bytes()) {
            Ok(header) => Some(header),
            Err(_) => {
                warn!(header = %h, "ignoring invalid CORS header");
                None
            }
        })
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers));

    if cors.allow_credentials {
        if wildcard {
            warn!("ignoring CORS credentials with a wildcard origin");
        } else {
            layer = layer.allow_credentials(true);
        }
    }

    layer
}
