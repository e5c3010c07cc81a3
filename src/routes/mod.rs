pub mod analytics;
pub mod auth;
pub mod feedback;
pub mod health;
pub mod menu;
pub mod metrics;
pub mod wastage;

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// Success envelope the clients read: `{ "success": true, "data": … }`.
pub fn ok(data: impl Serialize) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}
