use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    errors::ApiError,
    models::{
        auth::AdminUser,
        menu::{AddItemRequest, RemoveItemRequest, Weekday},
    },
    routes::ok,
    services::{menu::MenuService, metrics, upload},
    AppState,
};

/// GET /menu/all-days — the whole 7-day cycle plus today's context.
/// Open to everyone; feedback gating happens on the write paths.
pub async fn get_all_days(State(state): State<AppState>) -> Json<Value> {
    let data = state.data.read().await;
    Json(json!({
        "success": true,
        "data": &data.menu,
        "today": state.today(),
        "currentMeal": MenuService::current_meal(Local::now().time()),
    }))
}

/// GET /menu/day/{day}
pub async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let day: Weekday = day
        .parse()
        .map_err(|_| ApiError::Validation(format!("'{day}' is not a valid day")))?;
    let data = state.data.read().await;
    Ok(ok(data.menu.day(day).clone()))
}

/// POST /menu/upload — admin only. Multipart with a `file` field holding
/// an .xlsx/.xls/.csv menu sheet.
pub async fn upload_menu(
    State(state): State<AppState>,
    admin: AdminUser,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("menu.xlsx").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Malformed upload: {e}")))?;
            file = Some((filename, bytes.to_vec()));
        }
    }
    let (filename, bytes) = file.ok_or_else(|| ApiError::Validation("No file field in upload".into()))?;

    let parsed = match upload::parse_menu_upload(&filename, &bytes) {
        Ok(parsed) => parsed,
        Err(e) => {
            metrics::UPLOADS_COUNTER.with_label_values(&["rejected"]).inc();
            return Err(e.into());
        }
    };

    let report = {
        let mut guard = state.data.write().await;
        let data = &mut *guard;
        MenuService::apply_upload(&mut data.menu, &mut data.ledger, parsed)
    };
    state.persist().await?;

    let status = if report.warnings.is_empty() { "success" } else { "partial" };
    metrics::UPLOADS_COUNTER.with_label_values(&[status]).inc();
    info!(
        "Menu upload by {}: {}/7 days, {} items",
        admin.email, report.stats.days_found, report.stats.total_items
    );

    Ok(Json(json!({
        "success": true,
        "message": "Menu uploaded",
        "warnings": report.warnings,
        "stats": report.stats,
    })))
}

/// POST /menu/add-item — admin only.
pub async fn add_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<Value>, ApiError> {
    let item = {
        let mut data = state.data.write().await;
        MenuService::add_item(&mut data.menu, body.day, body.meal, &body.food_name)?
    };
    state.persist().await?;
    info!(
        "Menu item '{}' added to {} {} by {}",
        item.name, body.day, body.meal, admin.email
    );
    Ok(ok(item))
}

/// DELETE /menu/remove-item — admin only.
pub async fn remove_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<RemoveItemRequest>,
) -> Result<Json<Value>, ApiError> {
    let removed = {
        let mut guard = state.data.write().await;
        let data = &mut *guard;
        MenuService::remove_item(&mut data.menu, &mut data.ledger, body.day, body.meal, &body.food_name)?
    };
    state.persist().await?;
    info!(
        "Menu item '{}' removed from {} {} by {}",
        removed.name, body.day, body.meal, admin.email
    );
    Ok(ok(removed))
}

/// DELETE /menu/remove-all — admin only. Clears the whole cycle.
pub async fn remove_all(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<Value>, ApiError> {
    let removed = {
        let mut guard = state.data.write().await;
        let data = &mut *guard;
        MenuService::remove_all(&mut data.menu, &mut data.ledger)
    };
    state.persist().await?;
    info!("Menu cleared ({removed} items) by {}", admin.email);
    Ok(ok(json!({ "removed": removed })))
}
