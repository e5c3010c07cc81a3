use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let data = state.data.read().await;
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "menuItems": data.menu.item_count(),
            "wastageEntries": data.wastage.entries.len(),
        })),
    )
}
