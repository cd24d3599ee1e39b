//! Income CRUD endpoints
//!
//! Incomes mirror expenses minus the type dimension.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use gastoweb_core::{
    validate_entry, validate_list_query, EntryKind, EntryPayload, IncomeRecord, ValidationMode,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::routes::{filter_from_spec, parse_payload, require_positive_id, ListResponse, OkResponse};
use crate::AppState;

/// GET /api/incomes?month=YYYY-MM&q=&category=&method=&limit=&offset=
pub async fn api_incomes_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<IncomeRecord>>> {
    let spec = validate_list_query(EntryKind::Income, &params)?;
    let filter = filter_from_spec(&spec);
    let total = state.store.count_incomes(&filter).await?;
    let items = state
        .store
        .list_incomes(&filter, spec.limit, spec.offset)
        .await?;
    Ok(Json(ListResponse {
        items,
        total,
        limit: spec.limit,
        offset: spec.offset,
    }))
}

/// POST /api/incomes
pub async fn api_incomes_create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<IncomeRecord>)> {
    let payload: EntryPayload = parse_payload(body)?;
    let change = validate_entry(EntryKind::Income, &payload, ValidationMode::Full)?;
    let entry = change.into_entry(EntryKind::Income)?;
    let created = state.store.create_income(&entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/incomes/:id - partial merge
pub async fn api_incomes_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<IncomeRecord>> {
    let id = require_positive_id(id)?;
    let payload: EntryPayload = parse_payload(body)?;
    let change = validate_entry(EntryKind::Income, &payload, ValidationMode::Partial)?;
    let updated = state.store.update_income(id, &change).await?;
    Ok(Json(updated))
}

/// DELETE /api/incomes/:id
pub async fn api_incomes_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<OkResponse>> {
    let id = require_positive_id(id)?;
    if !state.store.delete_income(id).await? {
        return Err(ApiError(gastoweb_core::CoreError::not_found("Income")));
    }
    Ok(Json(OkResponse::new()))
}
