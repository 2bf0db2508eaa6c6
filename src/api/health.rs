use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let networks: Vec<_> = state.networks.iter().collect();
    Json(json!({
        "status": "ok",
        "networks": networks
    }))
}
