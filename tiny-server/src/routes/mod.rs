use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use tiny_model::routes;

use crate::{
    AppState,
    handlers::{convert::convert_handler, tools::list_tools_handler},
};

/// API routes. The upload limit applies to the conversion route only.
pub fn create_api_router(state: AppState) -> Router<AppState> {
    let max_upload = state.config().upload.max_bytes;

    Router::new()
        .route(
            routes::CONVERT,
            post(convert_handler).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route(routes::TOOLS, get(list_tools_handler))
}
