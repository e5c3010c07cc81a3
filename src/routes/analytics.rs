use axum::{extract::State, Json};
use serde_json::Value;

use crate::{routes::ok, services::analytics::AnalyticsService, AppState};

/// GET /analytics — totals and per-item stats for the admin charts.
pub async fn get_analytics(State(state): State<AppState>) -> Json<Value> {
    let data = state.data.read().await;
    ok(AnalyticsService::summarize(&data.menu))
}
