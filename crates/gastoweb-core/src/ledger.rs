//! The ledger storage seam
//!
//! `LedgerStore` is the read/aggregate surface the metrics engine needs
//! from storage. Sub-queries issued through it are mutually read-only
//! and order-independent, so callers may fan them out concurrently.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::filter::EntryFilter;
use crate::settings::{MonthlyIncome, StoredSettings};
use crate::types::{ExpenseType, PaymentMethod, ReserveMovement};

/// A ledger expense as returned by read queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub category_id: i64,
    pub category_name: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A ledger income as returned by read queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeRecord {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub category_id: i64,
    pub category_name: String,
    pub method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A reserve movement as returned by read queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReserveRecord {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub movement_type: ReserveMovement,
    pub method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A category row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub created_at: Option<String>,
}

/// Aggregated spend of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_name: String,
    pub total_spend: f64,
}

/// Read and aggregate operations the metrics engine issues against the
/// ledger. All sums default to 0 when no rows match.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Idempotent create-if-absent, then fetch, of the settings singleton
    async fn load_settings(&self) -> CoreResult<StoredSettings>;

    /// Income override for the exact month, if any
    async fn monthly_income(&self, month: &str) -> CoreResult<Option<MonthlyIncome>>;

    async fn sum_expenses(&self, filter: &EntryFilter) -> CoreResult<f64>;

    async fn sum_incomes(&self, filter: &EntryFilter) -> CoreResult<f64>;

    /// Spend per expense type; types with no rows are absent
    async fn expense_totals_by_type(
        &self,
        filter: &EntryFilter,
    ) -> CoreResult<Vec<(ExpenseType, f64)>>;

    /// Top categories by spend, descending, name-ascending on ties
    async fn expense_totals_by_category(
        &self,
        filter: &EntryFilter,
        limit: i64,
    ) -> CoreResult<Vec<CategoryTotal>>;

    /// Spend per day-of-month; days with no rows are absent
    async fn expense_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>>;

    /// Income per day-of-month; days with no rows are absent
    async fn income_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>>;

    /// Spend per "YYYY-MM" month; months with no rows are absent
    async fn expense_monthly_totals(
        &self,
        filter: &EntryFilter,
    ) -> CoreResult<Vec<(String, f64)>>;

    /// Latest matching expenses, date descending then id descending
    async fn latest_expenses(
        &self,
        filter: &EntryFilter,
        limit: i64,
    ) -> CoreResult<Vec<ExpenseRecord>>;
}

/// Store reference type
pub type StoreRef = Arc<dyn LedgerStore>;
