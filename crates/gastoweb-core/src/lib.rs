//! Core ledger domain logic and dashboard metrics engine
//!
//! Framework-free building blocks of gastoweb:
//! - fixed enums of the domain (`types`)
//! - money rounding (`money`) and calendar-month math (`time`)
//! - record validation and partial merge (`record`)
//! - typed ledger filters (`filter`)
//! - salary/budget settings resolution (`settings`)
//! - the storage seam (`ledger`) and the metrics engine (`dashboard`)

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod money;
pub mod record;
pub mod settings;
pub mod time;
pub mod types;

pub use dashboard::{
    CategoryBreakdown, DailyPoint, DashboardRequest, DashboardSnapshot, DashboardTotals,
    MetricsEngine, MonthlyPoint, TypeBreakdown,
};
pub use error::{CoreError, CoreResult, ErrorCode};
pub use filter::{EntryFilter, FilterClause};
pub use ledger::{
    CategoryRecord, CategoryTotal, ExpenseRecord, IncomeRecord, LedgerStore, ReserveRecord,
    StoreRef,
};
pub use money::{round1, round2};
pub use record::{
    validate_category, validate_entry, validate_list_query, validate_monthly_income,
    validate_settings, CategoryPayload, EntryChange, EntryKind, EntryPayload, ListSpec,
    MonthlyIncomePayload, SettingsChange, SettingsPayload, StoredEntry, ValidationMode,
};
pub use settings::{resolve_effective, EffectiveSettings, MonthlyIncome, StoredSettings};
pub use time::{monday_of_week, next_day, Clock, ClockRef, Month, MonthRange, SystemClock};
pub use types::{ExpenseType, IncomeSource, PaymentMethod, ReserveMovement};
