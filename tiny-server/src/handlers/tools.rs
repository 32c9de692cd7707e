use axum::Json;

use tiny_model::{ToolSummary, tool_catalog};

pub async fn list_tools_handler() -> Json<Vec<ToolSummary>> {
    Json(tool_catalog())
}
