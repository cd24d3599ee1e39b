//! Salary and budget settings resolution
//!
//! The settings singleton always exists (created lazily with zero
//! defaults). A `MonthlyIncome` row overrides only the income portion
//! for its exact month; budget and payday are never overridable.

use serde::{Deserialize, Serialize};

use crate::money::round2;
use crate::types::IncomeSource;

/// The always-present default configuration row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    pub net_salary: f64,
    pub extra_income: f64,
    pub monthly_budget: f64,
    pub payday_day: i64,
    pub updated_at: Option<String>,
}

/// A per-month substitute for the default salary figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub month: String,
    pub net_salary: f64,
    pub extra_income: f64,
    pub updated_at: Option<String>,
}

/// The settings actually used for a month's calculations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveSettings {
    pub net_salary: f64,
    pub extra_income: f64,
    pub monthly_budget: f64,
    pub payday_day: i64,
    pub income_source: IncomeSource,
    pub monthly_income_updated_at: Option<String>,
}

impl EffectiveSettings {
    pub fn salary_total(&self) -> f64 {
        round2(self.net_salary + self.extra_income)
    }
}

/// Resolve the effective settings for a month. An override replaces the
/// income figures only; budget and payday always come from the
/// singleton.
pub fn resolve_effective(
    stored: &StoredSettings,
    monthly: Option<&MonthlyIncome>,
) -> EffectiveSettings {
    match monthly {
        Some(income) => EffectiveSettings {
            net_salary: round2(income.net_salary),
            extra_income: round2(income.extra_income),
            monthly_budget: round2(stored.monthly_budget),
            payday_day: stored.payday_day,
            income_source: IncomeSource::Monthly,
            monthly_income_updated_at: income.updated_at.clone(),
        },
        None => EffectiveSettings {
            net_salary: round2(stored.net_salary),
            extra_income: round2(stored.extra_income),
            monthly_budget: round2(stored.monthly_budget),
            payday_day: stored.payday_day,
            income_source: IncomeSource::Default,
            monthly_income_updated_at: None,
        },
    }
}
