//! Reserve movement CRUD endpoints
//!
//! Reserves are an independent ledger: no category, and their figures
//! never feed the salary/budget dashboard math.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use gastoweb_core::{
    validate_entry, validate_list_query, EntryKind, EntryPayload, ReserveRecord, ValidationMode,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::routes::{filter_from_spec, parse_payload, require_positive_id, ListResponse, OkResponse};
use crate::AppState;

/// GET /api/reserves?month=YYYY-MM&q=&movement_type=&method=&limit=&offset=
pub async fn api_reserves_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<ReserveRecord>>> {
    let spec = validate_list_query(EntryKind::Reserve, &params)?;
    let filter = filter_from_spec(&spec);
    let total = state.store.count_reserves(&filter).await?;
    let items = state
        .store
        .list_reserves(&filter, spec.limit, spec.offset)
        .await?;
    Ok(Json(ListResponse {
        items,
        total,
        limit: spec.limit,
        offset: spec.offset,
    }))
}

/// POST /api/reserves
pub async fn api_reserves_create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<ReserveRecord>)> {
    let payload: EntryPayload = parse_payload(body)?;
    let change = validate_entry(EntryKind::Reserve, &payload, ValidationMode::Full)?;
    let entry = change.into_entry(EntryKind::Reserve)?;
    let created = state.store.create_reserve(&entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/reserves/:id - partial merge
pub async fn api_reserves_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ReserveRecord>> {
    let id = require_positive_id(id)?;
    let payload: EntryPayload = parse_payload(body)?;
    let change = validate_entry(EntryKind::Reserve, &payload, ValidationMode::Partial)?;
    let updated = state.store.update_reserve(id, &change).await?;
    Ok(Json(updated))
}

/// DELETE /api/reserves/:id
pub async fn api_reserves_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<OkResponse>> {
    let id = require_positive_id(id)?;
    if !state.store.delete_reserve(id).await? {
        return Err(ApiError(gastoweb_core::CoreError::not_found("Reserve")));
    }
    Ok(Json(OkResponse::new()))
}
