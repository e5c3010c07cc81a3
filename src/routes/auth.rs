use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::{errors::ApiError, models::auth::LoginRequest, routes::ok, services::auth::AuthService, AppState};

/// POST /auth/admin/login — exchanges the configured admin credentials
/// for a bearer token.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let response = AuthService::login(&state.config, &body.email, &body.password)?;
    info!("Admin login: {}", state.config.admin_email);
    Ok(ok(response))
}
