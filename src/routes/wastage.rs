use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::{
    errors::ApiError,
    models::{auth::AdminUser, wastage::SubmitWastageRequest},
    routes::ok,
    services::wastage::WastageService,
    AppState,
};

/// GET /wastage — the rolling 7-entry series, oldest first.
pub async fn get_wastage(State(state): State<AppState>) -> Json<Value> {
    let data = state.data.read().await;
    ok(&data.wastage.entries)
}

/// GET /wastage/yesterday — yesterday's figures with the could-have-fed
/// estimate, or null when nothing was recorded.
pub async fn get_yesterday(State(state): State<AppState>) -> Json<Value> {
    let data = state.data.read().await;
    ok(WastageService::yesterday(&data.wastage, state.today_date()))
}

/// POST /wastage/submit — admin only; records (or corrects) today's
/// figures.
pub async fn submit_wastage(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<SubmitWastageRequest>,
) -> Result<Json<Value>, ApiError> {
    let today = state.today_date();
    let entry = {
        let mut data = state.data.write().await;
        WastageService::record(&mut data.wastage, body.cooked, body.wasted, today)?
    };
    state.persist().await?;
    info!(
        "Wastage recorded by {}: cooked {} kg, wasted {} kg",
        admin.email, entry.cooked, entry.wasted
    );
    Ok(ok(entry))
}
