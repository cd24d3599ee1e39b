//! Monthly income override endpoints
//!
//! An override replaces the default salary figures for one exact month.
//! Deleting it reverts that month to the settings singleton.

use axum::extract::{Path, Query, State};
use axum::Json;
use gastoweb_core::{
    round2, validate_monthly_income, CoreError, Month, MonthlyIncome, MonthlyIncomePayload,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::routes::{parse_payload, OkResponse};
use crate::AppState;

const LIST_LIMIT: i64 = 24;

/// One override as returned to clients
#[derive(Debug, Serialize)]
pub struct MonthlyIncomeView {
    pub month: String,
    pub net_salary: f64,
    pub extra_income: f64,
    pub salary_total: f64,
    pub updated_at: Option<String>,
    pub exists: bool,
}

fn view(income: MonthlyIncome) -> MonthlyIncomeView {
    MonthlyIncomeView {
        salary_total: round2(income.net_salary + income.extra_income),
        month: income.month,
        net_salary: income.net_salary,
        extra_income: income.extra_income,
        updated_at: income.updated_at,
        exists: true,
    }
}

fn absent_view(month: &Month) -> MonthlyIncomeView {
    MonthlyIncomeView {
        month: month.label(),
        net_salary: 0.0,
        extra_income: 0.0,
        salary_total: 0.0,
        updated_at: None,
        exists: false,
    }
}

fn parse_month(raw: &str) -> Result<Month, ApiError> {
    Month::parse(raw)
        .ok_or_else(|| ApiError(CoreError::validation("month must be in YYYY-MM format.")))
}

/// GET /api/monthly-income[?month=YYYY-MM] - one month or the recent list
pub async fn api_monthly_income_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    if let Some(raw) = params.get("month") {
        let month = parse_month(raw)?;
        let found = state.store.monthly_income(&month.label()).await?;
        let body = match found {
            Some(income) => json!(view(income)),
            None => json!(absent_view(&month)),
        };
        return Ok(Json(body));
    }

    let items: Vec<MonthlyIncomeView> = state
        .store
        .list_monthly_incomes(LIST_LIMIT)
        .await?
        .into_iter()
        .map(view)
        .collect();
    Ok(Json(json!({ "items": items })))
}

/// GET /api/monthly-income/:month
pub async fn api_monthly_income_get(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<MonthlyIncomeView>> {
    let month = parse_month(&raw)?;
    let found = state.store.monthly_income(&month.label()).await?;
    Ok(Json(match found {
        Some(income) => view(income),
        None => absent_view(&month),
    }))
}

/// PUT /api/monthly-income/:month - full-payload upsert
pub async fn api_monthly_income_put(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<MonthlyIncomeView>> {
    let month = parse_month(&raw)?;
    let payload: MonthlyIncomePayload = parse_payload(body)?;
    let (net_salary, extra_income) = validate_monthly_income(&payload)?;
    let saved = state
        .store
        .upsert_monthly_income(&month.label(), net_salary, extra_income)
        .await?;
    Ok(Json(view(saved)))
}

/// DELETE /api/monthly-income/:month
pub async fn api_monthly_income_delete(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    let month = parse_month(&raw)?;
    if !state.store.delete_monthly_income(&month.label()).await? {
        return Err(ApiError(CoreError::not_found("Monthly income")));
    }
    Ok(Json(OkResponse::new()))
}
