//! Settings endpoints - the salary/budget singleton

use axum::extract::State;
use axum::Json;
use gastoweb_core::{
    round2, validate_settings, SettingsPayload, StoredSettings, ValidationMode,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::routes::parse_payload;
use crate::AppState;

/// Settings as returned to clients, with the derived salary total
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub net_salary: f64,
    pub extra_income: f64,
    pub monthly_budget: f64,
    pub payday_day: i64,
    pub salary_total: f64,
    pub updated_at: Option<String>,
}

fn view(settings: StoredSettings) -> SettingsView {
    SettingsView {
        salary_total: round2(settings.net_salary + settings.extra_income),
        net_salary: settings.net_salary,
        extra_income: settings.extra_income,
        monthly_budget: settings.monthly_budget,
        payday_day: settings.payday_day,
        updated_at: settings.updated_at,
    }
}

/// GET /api/settings
pub async fn api_settings_get(State(state): State<AppState>) -> ApiResult<Json<SettingsView>> {
    let settings = state.store.load_settings().await?;
    Ok(Json(view(settings)))
}

/// PUT /api/settings - partial merge over the singleton
pub async fn api_settings_update(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<SettingsView>> {
    let payload: SettingsPayload = parse_payload(body)?;
    let change = validate_settings(&payload, ValidationMode::Partial)?;
    let updated = state.store.update_settings(&change).await?;
    Ok(Json(view(updated)))
}
