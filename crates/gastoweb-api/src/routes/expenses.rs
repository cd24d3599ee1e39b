//! Expense CRUD endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use gastoweb_core::{
    validate_entry, validate_list_query, EntryKind, EntryPayload, ExpenseRecord, ValidationMode,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::routes::{filter_from_spec, parse_payload, require_positive_id, ListResponse, OkResponse};
use crate::AppState;

/// GET /api/expenses?month=YYYY-MM&q=&category=&type=&method=&limit=&offset=
pub async fn api_expenses_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<ExpenseRecord>>> {
    let spec = validate_list_query(EntryKind::Expense, &params)?;
    let filter = filter_from_spec(&spec);
    // the count and the page evaluate the same compiled predicate
    let total = state.store.count_expenses(&filter).await?;
    let items = state
        .store
        .list_expenses(&filter, spec.limit, spec.offset)
        .await?;
    Ok(Json(ListResponse {
        items,
        total,
        limit: spec.limit,
        offset: spec.offset,
    }))
}

/// POST /api/expenses
pub async fn api_expenses_create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<ExpenseRecord>)> {
    let payload: EntryPayload = parse_payload(body)?;
    let change = validate_entry(EntryKind::Expense, &payload, ValidationMode::Full)?;
    let entry = change.into_entry(EntryKind::Expense)?;
    let created = state.store.create_expense(&entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/expenses/:id - partial merge
pub async fn api_expenses_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ExpenseRecord>> {
    let id = require_positive_id(id)?;
    let payload: EntryPayload = parse_payload(body)?;
    let change = validate_entry(EntryKind::Expense, &payload, ValidationMode::Partial)?;
    let updated = state.store.update_expense(id, &change).await?;
    Ok(Json(updated))
}

/// DELETE /api/expenses/:id
pub async fn api_expenses_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<OkResponse>> {
    let id = require_positive_id(id)?;
    if !state.store.delete_expense(id).await? {
        return Err(ApiError(gastoweb_core::CoreError::not_found("Expense")));
    }
    Ok(Json(OkResponse::new()))
}
