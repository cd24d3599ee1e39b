//! Dashboard metrics engine
//!
//! Builds the monthly snapshot: resolves effective settings, derives the
//! month / trailing-12 / today / week filter variants, fans the
//! aggregate sub-queries out concurrently, and assembles a dense,
//! null-safe snapshot. No partial snapshot is ever returned; a failing
//! sub-query fails the whole computation.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::filter::EntryFilter;
use crate::ledger::{ExpenseRecord, StoreRef};
use crate::money::{round1, round2};
use crate::settings::resolve_effective;
use crate::time::{monday_of_week, next_day, ClockRef, Month};
use crate::types::{ExpenseType, IncomeSource};

/// Null-safe derived totals of a month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub spend_today: f64,
    pub spend_week: f64,
    pub gain_today: f64,
    pub gain_week: f64,
    pub spend_month: f64,
    pub gain_month: f64,
    /// None iff no salary is configured; never zero by convention
    pub salary_spent_percent: Option<f64>,
    pub estimated_left: f64,
    pub real_left: f64,
    /// None iff budget tracking is disabled (no budget configured)
    pub budget_left: Option<f64>,
}

/// One entry of the per-type breakdown; always five of these
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub total_spend: f64,
    /// None iff no salary is configured
    pub percent_of_salary: Option<f64>,
    /// 0 (not null) when the month has no spend
    pub percent_of_month_spend: f64,
}

/// One entry of the top-categories breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category_name: String,
    pub total_spend: f64,
    pub percent_of_salary: Option<f64>,
}

/// One day of the dense daily series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: u32,
    pub total_spend: f64,
    pub total_gain: f64,
}

/// One month of the dense trailing-12 series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub total_spend: f64,
}

/// The full dashboard snapshot for a month
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub month: String,
    pub salary_total: f64,
    pub net_salary: f64,
    pub extra_income: f64,
    pub monthly_budget: f64,
    pub payday_day: i64,
    pub income_source: IncomeSource,
    pub monthly_income_updated_at: Option<String>,
    pub totals: DashboardTotals,
    pub by_type: Vec<TypeBreakdown>,
    pub by_category: Vec<CategoryBreakdown>,
    pub daily_series: Vec<DailyPoint>,
    pub monthly_series: Vec<MonthlyPoint>,
    pub latest_expenses: Vec<ExpenseRecord>,
}

/// Raw dashboard request parameters, not yet validated
#[derive(Debug, Clone, Default)]
pub struct DashboardRequest {
    /// "YYYY-MM"; defaults to the current calendar month
    pub month: Option<String>,
    pub expense_type: Option<String>,
    pub category: Option<String>,
}

/// Stateless-per-call dashboard computation over an injected store and
/// clock
pub struct MetricsEngine {
    store: StoreRef,
    clock: ClockRef,
}

impl MetricsEngine {
    pub fn new(store: StoreRef, clock: ClockRef) -> Self {
        Self { store, clock }
    }

    pub async fn compute_dashboard(
        &self,
        request: &DashboardRequest,
    ) -> CoreResult<DashboardSnapshot> {
        let current_month = Month::from_date(self.clock.today());

        // Invalid input fails before any store access.
        let month = match request.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            Some(raw) => Month::parse(raw)
                .ok_or_else(|| CoreError::validation("month must be in YYYY-MM format."))?,
            None => current_month,
        };
        let expense_type = match request
            .expense_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            Some(raw) => Some(
                raw.parse::<ExpenseType>()
                    .map_err(CoreError::validation)?,
            ),
            None => None,
        };
        let category = request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let stored = self.store.load_settings().await?;
        let monthly_override = self.store.monthly_income(&month.label()).await?;
        let effective = resolve_effective(&stored, monthly_override.as_ref());
        let salary_total = effective.salary_total();

        let range = month.range();
        let trailing_start = month.add_months(-11).first_day();
        let trailing_end = month.add_months(1).first_day();

        let expense_filter = EntryFilter::new()
            .date_range(range.start, range.end)
            .expense_type(expense_type)
            .category_token(category);
        // Incomes have no type dimension; only the category filter applies.
        let income_filter = EntryFilter::new()
            .date_range(range.start, range.end)
            .category_token(category);
        let trailing_filter = EntryFilter::new()
            .date_range(trailing_start, trailing_end)
            .expense_type(expense_type)
            .category_token(category);

        let (
            spend_month,
            gain_month,
            type_rows,
            category_rows,
            daily_spend_rows,
            daily_gain_rows,
            monthly_rows,
            latest_expenses,
        ) = tokio::try_join!(
            self.store.sum_expenses(&expense_filter),
            self.store.sum_incomes(&income_filter),
            self.store.expense_totals_by_type(&expense_filter),
            self.store.expense_totals_by_category(&expense_filter, 10),
            self.store.expense_daily_totals(&expense_filter),
            self.store.income_daily_totals(&income_filter),
            self.store.expense_monthly_totals(&trailing_filter),
            self.store.latest_expenses(&expense_filter, 10),
        )?;

        let spend_month = round2(spend_month);
        let gain_month = round2(gain_month);
        let estimated_left = round2(salary_total - spend_month);
        let real_left = round2(salary_total + gain_month - spend_month);
        let budget_left = (effective.monthly_budget > 0.0)
            .then(|| round2(effective.monthly_budget - spend_month));
        let salary_spent_percent =
            (salary_total > 0.0).then(|| round1(spend_month / salary_total * 100.0));

        let type_map: HashMap<ExpenseType, f64> = type_rows.into_iter().collect();
        let by_type = ExpenseType::ALL
            .iter()
            .map(|expense_type| {
                let total_spend = round2(type_map.get(expense_type).copied().unwrap_or(0.0));
                TypeBreakdown {
                    expense_type: *expense_type,
                    total_spend,
                    percent_of_salary: (salary_total > 0.0)
                        .then(|| round1(total_spend / salary_total * 100.0)),
                    percent_of_month_spend: if spend_month > 0.0 {
                        round1(total_spend / spend_month * 100.0)
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        let by_category = category_rows
            .into_iter()
            .map(|row| {
                let total_spend = round2(row.total_spend);
                CategoryBreakdown {
                    category_name: row.category_name,
                    total_spend,
                    percent_of_salary: (salary_total > 0.0)
                        .then(|| round1(total_spend / salary_total * 100.0)),
                }
            })
            .collect();

        let daily_spend: HashMap<u32, f64> = daily_spend_rows.into_iter().collect();
        let daily_gain: HashMap<u32, f64> = daily_gain_rows.into_iter().collect();
        let daily_series = (1..=range.days_in_month)
            .map(|day| DailyPoint {
                day,
                total_spend: round2(daily_spend.get(&day).copied().unwrap_or(0.0)),
                total_gain: round2(daily_gain.get(&day).copied().unwrap_or(0.0)),
            })
            .collect();

        let monthly_map: HashMap<String, f64> = monthly_rows.into_iter().collect();
        let monthly_series = (0..12)
            .map(|index| {
                let label = month.add_months(index - 11).label();
                let total_spend = round2(monthly_map.get(&label).copied().unwrap_or(0.0));
                MonthlyPoint {
                    month: label,
                    total_spend,
                }
            })
            .collect();

        // Live figures only make sense while the selected month is the
        // current one; historical months report zeros.
        let (spend_today, spend_week, gain_today, gain_week) = if month == current_month {
            let today = self.clock.today();
            let tomorrow = next_day(today);
            let week_start = monday_of_week(today);

            let today_expenses = EntryFilter::new()
                .date_range(today, tomorrow)
                .expense_type(expense_type)
                .category_token(category);
            let week_expenses = EntryFilter::new()
                .date_range(week_start, tomorrow)
                .expense_type(expense_type)
                .category_token(category);
            let today_incomes = EntryFilter::new()
                .date_range(today, tomorrow)
                .category_token(category);
            let week_incomes = EntryFilter::new()
                .date_range(week_start, tomorrow)
                .category_token(category);

            let (spend_today, spend_week, gain_today, gain_week) = tokio::try_join!(
                self.store.sum_expenses(&today_expenses),
                self.store.sum_expenses(&week_expenses),
                self.store.sum_incomes(&today_incomes),
                self.store.sum_incomes(&week_incomes),
            )?;
            (
                round2(spend_today),
                round2(spend_week),
                round2(gain_today),
                round2(gain_week),
            )
        } else {
            (0.0, 0.0, 0.0, 0.0)
        };

        Ok(DashboardSnapshot {
            month: month.label(),
            salary_total,
            net_salary: effective.net_salary,
            extra_income: effective.extra_income,
            monthly_budget: effective.monthly_budget,
            payday_day: effective.payday_day,
            income_source: effective.income_source,
            monthly_income_updated_at: effective.monthly_income_updated_at,
            totals: DashboardTotals {
                spend_today,
                spend_week,
                gain_today,
                gain_week,
                spend_month,
                gain_month,
                salary_spent_percent,
                estimated_left,
                real_left,
                budget_left,
            },
            by_type,
            by_category,
            daily_series,
            monthly_series,
            latest_expenses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterClause;
    use crate::ledger::{CategoryTotal, LedgerStore};
    use crate::settings::{MonthlyIncome, StoredSettings};
    use crate::time::Clock;
    use crate::types::PaymentMethod;
    use async_trait::async_trait;
    use chrono::{Datelike, NaiveDate};
    use std::sync::Arc;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    #[derive(Clone)]
    struct FakeEntry {
        id: i64,
        date: NaiveDate,
        amount: f64,
        description: String,
        category_id: i64,
        category_name: String,
        expense_type: Option<ExpenseType>,
        method: PaymentMethod,
        notes: Option<String>,
    }

    fn expense(
        id: i64,
        date: &str,
        amount: f64,
        expense_type: ExpenseType,
        category: (i64, &str),
    ) -> FakeEntry {
        FakeEntry {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            description: format!("entry {}", id),
            category_id: category.0,
            category_name: category.1.to_string(),
            expense_type: Some(expense_type),
            method: PaymentMethod::Pix,
            notes: None,
        }
    }

    fn income(id: i64, date: &str, amount: f64, category: (i64, &str)) -> FakeEntry {
        FakeEntry {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            description: format!("entry {}", id),
            category_id: category.0,
            category_name: category.1.to_string(),
            expense_type: None,
            method: PaymentMethod::Pix,
            notes: None,
        }
    }

    /// In-memory store that evaluates filters over plain vectors
    struct FakeStore {
        settings: StoredSettings,
        monthly: Vec<MonthlyIncome>,
        expenses: Vec<FakeEntry>,
        incomes: Vec<FakeEntry>,
    }

    impl Default for FakeStore {
        fn default() -> Self {
            FakeStore {
                settings: StoredSettings {
                    net_salary: 0.0,
                    extra_income: 0.0,
                    monthly_budget: 0.0,
                    payday_day: 1,
                    updated_at: None,
                },
                monthly: Vec::new(),
                expenses: Vec::new(),
                incomes: Vec::new(),
            }
        }
    }

    fn matches(entry: &FakeEntry, filter: &EntryFilter) -> bool {
        filter.clauses().iter().all(|clause| match clause {
            FilterClause::DateRange { start, end } => entry.date >= *start && entry.date < *end,
            FilterClause::ExpenseType(t) => entry.expense_type == Some(*t),
            FilterClause::CategoryId(id) => entry.category_id == *id,
            FilterClause::CategoryName(name) => {
                entry.category_name.to_lowercase() == name.to_lowercase()
            }
            FilterClause::Method(m) => entry.method == *m,
            FilterClause::Movement(_) => false,
            FilterClause::Text(q) => {
                let needle = q.to_lowercase();
                entry.description.to_lowercase().contains(&needle)
                    || entry
                        .notes
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&needle)
            }
        })
    }

    impl FakeStore {
        fn filtered<'a>(
            entries: &'a [FakeEntry],
            filter: &'a EntryFilter,
        ) -> impl Iterator<Item = &'a FakeEntry> {
            entries.iter().filter(move |entry| matches(entry, filter))
        }
    }

    #[async_trait]
    impl LedgerStore for FakeStore {
        async fn load_settings(&self) -> CoreResult<StoredSettings> {
            Ok(self.settings.clone())
        }

        async fn monthly_income(&self, month: &str) -> CoreResult<Option<MonthlyIncome>> {
            Ok(self.monthly.iter().find(|m| m.month == month).cloned())
        }

        async fn sum_expenses(&self, filter: &EntryFilter) -> CoreResult<f64> {
            Ok(Self::filtered(&self.expenses, filter).map(|e| e.amount).sum())
        }

        async fn sum_incomes(&self, filter: &EntryFilter) -> CoreResult<f64> {
            Ok(Self::filtered(&self.incomes, filter).map(|e| e.amount).sum())
        }

        async fn expense_totals_by_type(
            &self,
            filter: &EntryFilter,
        ) -> CoreResult<Vec<(ExpenseType, f64)>> {
            let mut totals: HashMap<ExpenseType, f64> = HashMap::new();
            for entry in Self::filtered(&self.expenses, filter) {
                if let Some(t) = entry.expense_type {
                    *totals.entry(t).or_insert(0.0) += entry.amount;
                }
            }
            Ok(totals.into_iter().collect())
        }

        async fn expense_totals_by_category(
            &self,
            filter: &EntryFilter,
            limit: i64,
        ) -> CoreResult<Vec<CategoryTotal>> {
            let mut totals: HashMap<String, f64> = HashMap::new();
            for entry in Self::filtered(&self.expenses, filter) {
                *totals.entry(entry.category_name.clone()).or_insert(0.0) += entry.amount;
            }
            let mut rows: Vec<CategoryTotal> = totals
                .into_iter()
                .map(|(category_name, total_spend)| CategoryTotal {
                    category_name,
                    total_spend,
                })
                .collect();
            rows.sort_by(|a, b| {
                b.total_spend
                    .partial_cmp(&a.total_spend)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.category_name.cmp(&b.category_name))
            });
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn expense_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>> {
            let mut totals: HashMap<u32, f64> = HashMap::new();
            for entry in Self::filtered(&self.expenses, filter) {
                *totals.entry(entry.date.day()).or_insert(0.0) += entry.amount;
            }
            Ok(totals.into_iter().collect())
        }

        async fn income_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>> {
            let mut totals: HashMap<u32, f64> = HashMap::new();
            for entry in Self::filtered(&self.incomes, filter) {
                *totals.entry(entry.date.day()).or_insert(0.0) += entry.amount;
            }
            Ok(totals.into_iter().collect())
        }

        async fn expense_monthly_totals(
            &self,
            filter: &EntryFilter,
        ) -> CoreResult<Vec<(String, f64)>> {
            let mut totals: HashMap<String, f64> = HashMap::new();
            for entry in Self::filtered(&self.expenses, filter) {
                let label = format!("{:04}-{:02}", entry.date.year(), entry.date.month());
                *totals.entry(label).or_insert(0.0) += entry.amount;
            }
            Ok(totals.into_iter().collect())
        }

        async fn latest_expenses(
            &self,
            filter: &EntryFilter,
            limit: i64,
        ) -> CoreResult<Vec<ExpenseRecord>> {
            let mut rows: Vec<&FakeEntry> = Self::filtered(&self.expenses, filter).collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
            rows.truncate(limit as usize);
            Ok(rows
                .into_iter()
                .map(|entry| ExpenseRecord {
                    id: entry.id,
                    date: entry.date.to_string(),
                    amount: entry.amount,
                    description: entry.description.clone(),
                    category_id: entry.category_id,
                    category_name: entry.category_name.clone(),
                    expense_type: entry.expense_type.unwrap_or(ExpenseType::Outros),
                    method: entry.method,
                    notes: entry.notes.clone(),
                    created_at: None,
                    updated_at: None,
                })
                .collect())
        }
    }

    fn engine(store: FakeStore, today: &str) -> MetricsEngine {
        MetricsEngine::new(
            Arc::new(store),
            Arc::new(FixedClock(
                NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap(),
            )),
        )
    }

    fn request(month: &str) -> DashboardRequest {
        DashboardRequest {
            month: Some(month.to_string()),
            ..DashboardRequest::default()
        }
    }

    #[tokio::test]
    async fn test_empty_ledger_is_dense_and_null_safe() {
        let engine = engine(FakeStore::default(), "2024-06-15");
        let snapshot = engine.compute_dashboard(&request("2024-02")).await.unwrap();

        assert_eq!(snapshot.month, "2024-02");
        assert_eq!(snapshot.by_type.len(), 5);
        for entry in &snapshot.by_type {
            assert_eq!(entry.total_spend, 0.0);
            assert_eq!(entry.percent_of_salary, None);
            assert_eq!(entry.percent_of_month_spend, 0.0);
        }
        // leap February
        assert_eq!(snapshot.daily_series.len(), 29);
        let days: Vec<u32> = snapshot.daily_series.iter().map(|p| p.day).collect();
        assert_eq!(days, (1..=29).collect::<Vec<u32>>());

        assert_eq!(snapshot.monthly_series.len(), 12);
        assert_eq!(snapshot.monthly_series[0].month, "2023-03");
        assert_eq!(snapshot.monthly_series[11].month, "2024-02");

        assert_eq!(snapshot.totals.spend_month, 0.0);
        assert_eq!(snapshot.totals.gain_month, 0.0);
        assert_eq!(snapshot.totals.salary_spent_percent, None);
        assert_eq!(snapshot.totals.budget_left, None);
        assert_eq!(snapshot.income_source, IncomeSource::Default);
        assert!(snapshot.latest_expenses.is_empty());
    }

    #[tokio::test]
    async fn test_salary_budget_scenario() {
        let store = FakeStore {
            settings: StoredSettings {
                net_salary: 3000.0,
                extra_income: 0.0,
                monthly_budget: 1000.0,
                payday_day: 5,
                updated_at: None,
            },
            expenses: vec![expense(
                1,
                "2024-05-10",
                200.0,
                ExpenseType::Essencial,
                (1, "Mercado"),
            )],
            ..FakeStore::default()
        };
        // clock is in another month: live figures stay zero
        let engine = engine(store, "2024-06-15");
        let snapshot = engine.compute_dashboard(&request("2024-05")).await.unwrap();

        assert_eq!(snapshot.salary_total, 3000.0);
        assert_eq!(snapshot.totals.spend_month, 200.0);
        assert_eq!(snapshot.totals.estimated_left, 2800.0);
        assert_eq!(snapshot.totals.real_left, 2800.0);
        assert_eq!(snapshot.totals.budget_left, Some(800.0));
        assert_eq!(snapshot.totals.salary_spent_percent, Some(6.7));
        assert_eq!(snapshot.totals.spend_today, 0.0);
        assert_eq!(snapshot.totals.spend_week, 0.0);
        assert_eq!(snapshot.totals.gain_today, 0.0);
        assert_eq!(snapshot.totals.gain_week, 0.0);

        let essencial = snapshot
            .by_type
            .iter()
            .find(|b| b.expense_type == ExpenseType::Essencial)
            .unwrap();
        assert_eq!(essencial.total_spend, 200.0);
        assert_eq!(essencial.percent_of_salary, Some(6.7));
        assert_eq!(essencial.percent_of_month_spend, 100.0);
        for other in snapshot
            .by_type
            .iter()
            .filter(|b| b.expense_type != ExpenseType::Essencial)
        {
            assert_eq!(other.total_spend, 0.0);
            assert_eq!(other.percent_of_salary, Some(0.0));
            assert_eq!(other.percent_of_month_spend, 0.0);
        }

        assert_eq!(snapshot.daily_series.len(), 31);
        assert_eq!(snapshot.daily_series[9].day, 10);
        assert_eq!(snapshot.daily_series[9].total_spend, 200.0);
        assert_eq!(snapshot.daily_series[8].total_spend, 0.0);

        assert_eq!(snapshot.by_category.len(), 1);
        assert_eq!(snapshot.by_category[0].category_name, "Mercado");
        assert_eq!(snapshot.by_category[0].percent_of_salary, Some(6.7));

        assert_eq!(snapshot.latest_expenses.len(), 1);
        assert_eq!(snapshot.latest_expenses[0].id, 1);
    }

    #[tokio::test]
    async fn test_live_figures_for_current_month() {
        // 2024-05-15 is a Wednesday; its week starts Monday 2024-05-13
        let store = FakeStore {
            expenses: vec![
                expense(1, "2024-05-15", 50.0, ExpenseType::Lazer, (1, "Bar")),
                expense(2, "2024-05-13", 30.0, ExpenseType::Lazer, (1, "Bar")),
                expense(3, "2024-05-05", 20.0, ExpenseType::Lazer, (1, "Bar")),
            ],
            incomes: vec![
                income(1, "2024-05-15", 75.0, (2, "Freela")),
                income(2, "2024-05-12", 25.0, (2, "Freela")),
            ],
            ..FakeStore::default()
        };
        let engine = engine(store, "2024-05-15");
        let snapshot = engine.compute_dashboard(&request("2024-05")).await.unwrap();

        assert_eq!(snapshot.totals.spend_today, 50.0);
        assert_eq!(snapshot.totals.spend_week, 80.0);
        assert_eq!(snapshot.totals.spend_month, 100.0);
        assert_eq!(snapshot.totals.gain_today, 75.0);
        // the income on the 12th (a Sunday) belongs to the prior week
        assert_eq!(snapshot.totals.gain_week, 75.0);
        assert_eq!(snapshot.totals.gain_month, 100.0);
    }

    #[tokio::test]
    async fn test_monthly_override_applies_to_its_month_only() {
        let store = FakeStore {
            settings: StoredSettings {
                net_salary: 3000.0,
                extra_income: 0.0,
                monthly_budget: 1000.0,
                payday_day: 5,
                updated_at: None,
            },
            monthly: vec![MonthlyIncome {
                month: "2024-05".to_string(),
                net_salary: 5000.0,
                extra_income: 100.0,
                updated_at: Some("2024-05-02 09:00:00".to_string()),
            }],
            ..FakeStore::default()
        };
        let engine = engine(store, "2024-06-15");

        let overridden = engine.compute_dashboard(&request("2024-05")).await.unwrap();
        assert_eq!(overridden.income_source, IncomeSource::Monthly);
        assert_eq!(overridden.net_salary, 5000.0);
        assert_eq!(overridden.extra_income, 100.0);
        assert_eq!(overridden.salary_total, 5100.0);
        // budget still from the singleton
        assert_eq!(overridden.monthly_budget, 1000.0);
        assert!(overridden.monthly_income_updated_at.is_some());

        let plain = engine.compute_dashboard(&request("2024-04")).await.unwrap();
        assert_eq!(plain.income_source, IncomeSource::Default);
        assert_eq!(plain.salary_total, 3000.0);
        assert_eq!(plain.monthly_income_updated_at, None);
    }

    #[tokio::test]
    async fn test_type_filter_never_reaches_incomes() {
        let store = FakeStore {
            expenses: vec![
                expense(1, "2024-05-10", 40.0, ExpenseType::Lazer, (1, "Bar")),
                expense(2, "2024-05-11", 60.0, ExpenseType::Essencial, (2, "Mercado")),
            ],
            incomes: vec![income(1, "2024-05-12", 500.0, (3, "Freela"))],
            ..FakeStore::default()
        };
        let engine = engine(store, "2024-06-15");
        let request = DashboardRequest {
            month: Some("2024-05".to_string()),
            expense_type: Some("Lazer".to_string()),
            category: None,
        };
        let snapshot = engine.compute_dashboard(&request).await.unwrap();

        assert_eq!(snapshot.totals.spend_month, 40.0);
        assert_eq!(snapshot.totals.gain_month, 500.0);
        assert_eq!(snapshot.latest_expenses.len(), 1);
        assert_eq!(snapshot.latest_expenses[0].id, 1);
    }

    #[tokio::test]
    async fn test_category_filter_by_name_and_id() {
        let store = FakeStore {
            expenses: vec![
                expense(1, "2024-05-10", 40.0, ExpenseType::Lazer, (1, "Bar")),
                expense(2, "2024-05-11", 60.0, ExpenseType::Lazer, (2, "Mercado")),
            ],
            ..FakeStore::default()
        };
        let engine = engine(store, "2024-06-15");

        let by_name = DashboardRequest {
            month: Some("2024-05".to_string()),
            expense_type: None,
            category: Some("bar".to_string()),
        };
        let snapshot = engine.compute_dashboard(&by_name).await.unwrap();
        assert_eq!(snapshot.totals.spend_month, 40.0);

        let by_id = DashboardRequest {
            month: Some("2024-05".to_string()),
            expense_type: None,
            category: Some("2".to_string()),
        };
        let snapshot = engine.compute_dashboard(&by_id).await.unwrap();
        assert_eq!(snapshot.totals.spend_month, 60.0);

        // nonexistent category: zeros, not an error
        let missing = DashboardRequest {
            month: Some("2024-05".to_string()),
            expense_type: None,
            category: Some("999".to_string()),
        };
        let snapshot = engine.compute_dashboard(&missing).await.unwrap();
        assert_eq!(snapshot.totals.spend_month, 0.0);
        assert!(snapshot.latest_expenses.is_empty());
    }

    #[tokio::test]
    async fn test_monthly_series_collects_trailing_year() {
        let store = FakeStore {
            expenses: vec![
                expense(1, "2024-05-10", 10.0, ExpenseType::Outros, (1, "Misc")),
                expense(2, "2024-01-15", 20.0, ExpenseType::Outros, (1, "Misc")),
                expense(3, "2023-06-20", 30.0, ExpenseType::Outros, (1, "Misc")),
                // outside the window
                expense(4, "2023-05-31", 99.0, ExpenseType::Outros, (1, "Misc")),
            ],
            ..FakeStore::default()
        };
        let engine = engine(store, "2024-06-15");
        let snapshot = engine.compute_dashboard(&request("2024-05")).await.unwrap();

        assert_eq!(snapshot.monthly_series.len(), 12);
        assert_eq!(snapshot.monthly_series[0].month, "2023-06");
        assert_eq!(snapshot.monthly_series[0].total_spend, 30.0);
        assert_eq!(snapshot.monthly_series[7].month, "2024-01");
        assert_eq!(snapshot.monthly_series[7].total_spend, 20.0);
        assert_eq!(snapshot.monthly_series[11].month, "2024-05");
        assert_eq!(snapshot.monthly_series[11].total_spend, 10.0);
        let window_total: f64 = snapshot
            .monthly_series
            .iter()
            .map(|p| p.total_spend)
            .sum();
        assert_eq!(window_total, 60.0);
    }

    #[tokio::test]
    async fn test_daily_gain_series() {
        let store = FakeStore {
            incomes: vec![
                income(1, "2024-05-03", 120.0, (1, "Freela")),
                income(2, "2024-05-03", 30.0, (1, "Freela")),
            ],
            ..FakeStore::default()
        };
        let engine = engine(store, "2024-06-15");
        let snapshot = engine.compute_dashboard(&request("2024-05")).await.unwrap();
        assert_eq!(snapshot.daily_series[2].day, 3);
        assert_eq!(snapshot.daily_series[2].total_gain, 150.0);
        assert_eq!(snapshot.daily_series[2].total_spend, 0.0);
        assert_eq!(snapshot.daily_series[3].total_gain, 0.0);
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected() {
        let engine = engine(FakeStore::default(), "2024-06-15");

        let bad_month = DashboardRequest {
            month: Some("2024-5".to_string()),
            ..DashboardRequest::default()
        };
        assert!(matches!(
            engine.compute_dashboard(&bad_month).await,
            Err(CoreError::Validation { .. })
        ));

        let bad_type = DashboardRequest {
            month: Some("2024-05".to_string()),
            expense_type: Some("Groceries".to_string()),
            ..DashboardRequest::default()
        };
        assert!(matches!(
            engine.compute_dashboard(&bad_type).await,
            Err(CoreError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_month_defaults_to_current() {
        let engine = engine(FakeStore::default(), "2024-06-15");
        let snapshot = engine
            .compute_dashboard(&DashboardRequest::default())
            .await
            .unwrap();
        assert_eq!(snapshot.month, "2024-06");
    }
}
