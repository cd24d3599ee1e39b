//! Route modules for the API server
//!
//! Handlers are thin: parse the request, validate through the core
//! crate, issue the store call, shape the JSON response. All business
//! rules live below this layer.

pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod incomes;
pub mod monthly_income;
pub mod reserves;
pub mod settings;

use gastoweb_core::{CoreError, EntryFilter, ListSpec};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Paginated list envelope shared by the ledger endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Simple `{ "ok": true }` acknowledgement for deletions
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        OkResponse { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize a JSON body into a typed payload; shape mismatches are
/// validation errors, not internal faults.
pub(crate) fn parse_payload<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|_| ApiError(CoreError::validation("Invalid payload.")))
}

/// Positive-integer path id check shared by the mutation endpoints
pub(crate) fn require_positive_id(id: i64) -> Result<i64, ApiError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ApiError(CoreError::validation(
            "id must be a positive integer.",
        )))
    }
}

/// Compile a validated list spec into the reusable entry filter
pub(crate) fn filter_from_spec(spec: &ListSpec) -> EntryFilter {
    let range = spec.month.range();
    EntryFilter::new()
        .date_range(range.start, range.end)
        .expense_type(spec.expense_type)
        .category_token(spec.category.as_deref())
        .method(spec.method)
        .movement(spec.movement_type)
        .text(spec.q.as_deref())
}
