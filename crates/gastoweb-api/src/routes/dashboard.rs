//! Dashboard endpoint - the full monthly snapshot

use axum::extract::{Query, State};
use axum::Json;
use gastoweb_core::{DashboardRequest, DashboardSnapshot};
use std::collections::HashMap;

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/dashboard?month=YYYY-MM&type=&category=
pub async fn api_dashboard(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<DashboardSnapshot>> {
    let request = DashboardRequest {
        month: params.get("month").cloned(),
        expense_type: params.get("type").cloned(),
        category: params.get("category").cloned(),
    };
    let snapshot = state.engine.compute_dashboard(&request).await?;
    Ok(Json(snapshot))
}
