//! Category endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use gastoweb_core::{validate_category, CategoryPayload, CategoryRecord};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::routes::parse_payload;
use crate::AppState;

/// GET /api/categories
pub async fn api_categories_list(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let items = state.store.list_categories().await?;
    Ok(Json(json!({ "items": items })))
}

/// POST /api/categories
pub async fn api_categories_create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<CategoryRecord>)> {
    let payload: CategoryPayload = parse_payload(body)?;
    let name = validate_category(&payload)?;
    let created = state.store.create_category(&name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
