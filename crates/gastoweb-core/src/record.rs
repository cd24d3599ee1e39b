//! Ledger record validation and partial merge
//!
//! One validation path covers the three ledger entry kinds: expenses,
//! incomes and reserve movements share date/amount/description/method/
//! notes, and differ only in their discriminator (expense type, reserve
//! movement, or nothing) and whether they reference a category.
//!
//! `notes` is tri-state through a partial update: an absent field leaves
//! the stored value untouched, an explicit null or blank string clears
//! it, and a non-empty string replaces it trimmed.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::round2;
use crate::time::Month;
use crate::types::{ExpenseType, PaymentMethod, ReserveMovement};

pub const DESCRIPTION_MIN: usize = 2;
pub const DESCRIPTION_MAX: usize = 180;
pub const NOTES_MAX: usize = 1200;
pub const CATEGORY_NAME_MIN: usize = 2;
pub const CATEGORY_NAME_MAX: usize = 80;
pub const SEARCH_MAX: usize = 140;
pub const LIST_LIMIT_DEFAULT: i64 = 20;
pub const LIST_LIMIT_MAX: i64 = 100;
pub const PAYDAY_MIN: i64 = 1;
pub const PAYDAY_MAX: i64 = 28;

/// The three ledger entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Expense,
    Income,
    Reserve,
}

impl EntryKind {
    /// Expenses and incomes reference a category; reserves do not
    pub fn has_category(self) -> bool {
        matches!(self, EntryKind::Expense | EntryKind::Income)
    }

    pub fn noun(self) -> &'static str {
        match self {
            EntryKind::Expense => "expense",
            EntryKind::Income => "income",
            EntryKind::Reserve => "reserve",
        }
    }
}

/// Full requires every field; partial accepts any non-empty subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Full,
    Partial,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Raw JSON payload for creating or updating a ledger entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryPayload {
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    #[serde(rename = "type")]
    pub expense_type: Option<String>,
    pub movement_type: Option<String>,
    pub method: Option<String>,
    /// None = absent, Some(None) = explicit null, Some(Some(_)) = value
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Normalized field set produced by validation; only payload-present
/// fields are populated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryChange {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub expense_type: Option<ExpenseType>,
    pub movement_type: Option<ReserveMovement>,
    pub method: Option<PaymentMethod>,
    pub notes: Option<Option<String>>,
}

impl EntryChange {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.expense_type.is_none()
            && self.movement_type.is_none()
            && self.method.is_none()
            && self.notes.is_none()
    }

    /// Turn a full-mode change into a complete entry. Only valid after
    /// `validate_entry` with `ValidationMode::Full`.
    pub fn into_entry(self, kind: EntryKind) -> CoreResult<StoredEntry> {
        let method = self
            .method
            .ok_or_else(|| CoreError::internal("incomplete entry change: method"))?;
        Ok(StoredEntry {
            date: self
                .date
                .ok_or_else(|| CoreError::internal("incomplete entry change: date"))?,
            amount: self
                .amount
                .ok_or_else(|| CoreError::internal("incomplete entry change: amount"))?,
            description: self
                .description
                .ok_or_else(|| CoreError::internal("incomplete entry change: description"))?,
            category_id: if kind.has_category() {
                Some(self.category_id.ok_or_else(|| {
                    CoreError::internal("incomplete entry change: category_id")
                })?)
            } else {
                None
            },
            expense_type: match kind {
                EntryKind::Expense => Some(self.expense_type.ok_or_else(|| {
                    CoreError::internal("incomplete entry change: type")
                })?),
                _ => None,
            },
            movement_type: match kind {
                EntryKind::Reserve => Some(self.movement_type.ok_or_else(|| {
                    CoreError::internal("incomplete entry change: movement_type")
                })?),
                _ => None,
            },
            method,
            notes: self.notes.unwrap_or(None),
        })
    }
}

/// A fully populated ledger entry, as stored
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category_id: Option<i64>,
    pub expense_type: Option<ExpenseType>,
    pub movement_type: Option<ReserveMovement>,
    pub method: PaymentMethod,
    pub notes: Option<String>,
}

impl StoredEntry {
    /// Overlay payload-present fields onto this entry; untouched fields
    /// keep their stored values, including the tri-state notes.
    pub fn merged_with(&self, change: &EntryChange) -> StoredEntry {
        StoredEntry {
            date: change.date.unwrap_or(self.date),
            amount: change.amount.unwrap_or(self.amount),
            description: change
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            category_id: change.category_id.or(self.category_id),
            expense_type: change.expense_type.or(self.expense_type),
            movement_type: change.movement_type.or(self.movement_type),
            method: change.method.unwrap_or(self.method),
            notes: match &change.notes {
                None => self.notes.clone(),
                Some(value) => value.clone(),
            },
        }
    }
}

/// Parse a strict YYYY-MM-DD calendar date. Format-valid but
/// calendar-invalid dates (April 31) are rejected by chrono; the
/// round-trip comparison rejects unpadded variants.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    if date.format("%Y-%m-%d").to_string() != trimmed {
        return None;
    }
    Some(date)
}

/// Validate and normalize a ledger entry payload
pub fn validate_entry(
    kind: EntryKind,
    payload: &EntryPayload,
    mode: ValidationMode,
) -> CoreResult<EntryChange> {
    let mut errors: Vec<String> = Vec::new();
    let mut change = EntryChange::default();
    let full = mode == ValidationMode::Full;

    match &payload.date {
        Some(raw) => match parse_date(raw) {
            Some(date) => change.date = Some(date),
            None => errors.push("date must be a valid calendar date in YYYY-MM-DD format.".into()),
        },
        None if full => errors.push("date is required.".into()),
        None => {}
    }

    match payload.amount {
        Some(amount) => {
            if !amount.is_finite() || amount <= 0.0 {
                errors.push("amount must be a number greater than zero.".into());
            } else {
                change.amount = Some(round2(amount));
            }
        }
        None if full => errors.push("amount is required.".into()),
        None => {}
    }

    match &payload.description {
        Some(raw) => {
            let description = raw.trim();
            let length = description.chars().count();
            if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&length) {
                errors.push(format!(
                    "description must be between {} and {} characters.",
                    DESCRIPTION_MIN, DESCRIPTION_MAX
                ));
            } else {
                change.description = Some(description.to_string());
            }
        }
        None if full => errors.push("description is required.".into()),
        None => {}
    }

    if kind.has_category() {
        match payload.category_id {
            Some(id) if id > 0 => change.category_id = Some(id),
            Some(_) => errors.push("category_id must be a positive integer.".into()),
            None if full => errors.push("category_id is required.".into()),
            None => {}
        }
    }

    if kind == EntryKind::Expense {
        match &payload.expense_type {
            Some(raw) => match raw.trim().parse::<ExpenseType>() {
                Ok(expense_type) => change.expense_type = Some(expense_type),
                Err(message) => errors.push(message),
            },
            None if full => errors.push("type is required.".into()),
            None => {}
        }
    }

    if kind == EntryKind::Reserve {
        match &payload.movement_type {
            Some(raw) => match raw.trim().parse::<ReserveMovement>() {
                Ok(movement) => change.movement_type = Some(movement),
                Err(message) => errors.push(message),
            },
            None if full => errors.push("movement_type is required.".into()),
            None => {}
        }
    }

    match &payload.method {
        Some(raw) => match raw.trim().parse::<PaymentMethod>() {
            Ok(method) => change.method = Some(method),
            Err(message) => errors.push(message),
        },
        None if full => errors.push("method is required.".into()),
        None => {}
    }

    match &payload.notes {
        None => {
            if full {
                change.notes = Some(None);
            }
        }
        Some(None) => change.notes = Some(None),
        Some(Some(raw)) => {
            let notes = raw.trim();
            if notes.is_empty() {
                change.notes = Some(None);
            } else if notes.chars().count() > NOTES_MAX {
                errors.push(format!("notes must be at most {} characters.", NOTES_MAX));
            } else {
                change.notes = Some(Some(notes.to_string()));
            }
        }
    }

    if errors.is_empty() && mode == ValidationMode::Partial && change.is_empty() {
        errors.push(format!(
            "no valid fields provided to update the {}.",
            kind.noun()
        ));
    }

    if errors.is_empty() {
        Ok(change)
    } else {
        Err(CoreError::validation(errors.join(" ")))
    }
}

// ==================== Settings payloads ====================

/// Raw JSON payload for settings updates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPayload {
    pub net_salary: Option<f64>,
    pub extra_income: Option<f64>,
    pub monthly_budget: Option<f64>,
    pub payday_day: Option<i64>,
}

/// Normalized settings field subset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsChange {
    pub net_salary: Option<f64>,
    pub extra_income: Option<f64>,
    pub monthly_budget: Option<f64>,
    pub payday_day: Option<i64>,
}

impl SettingsChange {
    pub fn is_empty(&self) -> bool {
        self.net_salary.is_none()
            && self.extra_income.is_none()
            && self.monthly_budget.is_none()
            && self.payday_day.is_none()
    }
}

fn check_money(field: &str, value: f64, errors: &mut Vec<String>) -> Option<f64> {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{} must be a non-negative number.", field));
        None
    } else {
        Some(round2(value))
    }
}

/// Validate a settings payload; partial mode requires at least one field
pub fn validate_settings(
    payload: &SettingsPayload,
    mode: ValidationMode,
) -> CoreResult<SettingsChange> {
    let mut errors: Vec<String> = Vec::new();
    let mut change = SettingsChange::default();
    let full = mode == ValidationMode::Full;

    match payload.net_salary {
        Some(value) => change.net_salary = check_money("net_salary", value, &mut errors),
        None if full => errors.push("net_salary is required.".into()),
        None => {}
    }
    match payload.extra_income {
        Some(value) => change.extra_income = check_money("extra_income", value, &mut errors),
        None if full => errors.push("extra_income is required.".into()),
        None => {}
    }
    match payload.monthly_budget {
        Some(value) => change.monthly_budget = check_money("monthly_budget", value, &mut errors),
        None if full => errors.push("monthly_budget is required.".into()),
        None => {}
    }
    match payload.payday_day {
        Some(day) if (PAYDAY_MIN..=PAYDAY_MAX).contains(&day) => change.payday_day = Some(day),
        Some(_) => errors.push(format!(
            "payday_day must be an integer between {} and {}.",
            PAYDAY_MIN, PAYDAY_MAX
        )),
        None if full => errors.push("payday_day is required.".into()),
        None => {}
    }

    if errors.is_empty() && mode == ValidationMode::Partial && change.is_empty() {
        errors.push("no valid settings fields provided to update.".into());
    }

    if errors.is_empty() {
        Ok(change)
    } else {
        Err(CoreError::validation(errors.join(" ")))
    }
}

/// Raw JSON payload for a monthly income override
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyIncomePayload {
    pub net_salary: Option<f64>,
    pub extra_income: Option<f64>,
}

/// Validate a monthly income override payload; both figures required
pub fn validate_monthly_income(payload: &MonthlyIncomePayload) -> CoreResult<(f64, f64)> {
    let mut errors: Vec<String> = Vec::new();

    let net_salary = match payload.net_salary {
        Some(value) => check_money("net_salary", value, &mut errors),
        None => {
            errors.push("net_salary is required.".into());
            None
        }
    };
    let extra_income = match payload.extra_income {
        Some(value) => check_money("extra_income", value, &mut errors),
        None => {
            errors.push("extra_income is required.".into());
            None
        }
    };

    match (net_salary, extra_income) {
        (Some(net), Some(extra)) if errors.is_empty() => Ok((net, extra)),
        _ => Err(CoreError::validation(errors.join(" "))),
    }
}

/// Raw JSON payload for a category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
}

/// Validate a category payload
pub fn validate_category(payload: &CategoryPayload) -> CoreResult<String> {
    let raw = payload
        .name
        .as_deref()
        .ok_or_else(|| CoreError::validation("name is required."))?;
    let name = raw.trim();
    let length = name.chars().count();
    if !(CATEGORY_NAME_MIN..=CATEGORY_NAME_MAX).contains(&length) {
        return Err(CoreError::validation(format!(
            "name must be between {} and {} characters.",
            CATEGORY_NAME_MIN, CATEGORY_NAME_MAX
        )));
    }
    Ok(name.to_string())
}

// ==================== List query validation ====================

/// Validated list query for a ledger entity
#[derive(Debug, Clone, PartialEq)]
pub struct ListSpec {
    pub month: Month,
    pub q: Option<String>,
    pub category: Option<String>,
    pub expense_type: Option<ExpenseType>,
    pub method: Option<PaymentMethod>,
    pub movement_type: Option<ReserveMovement>,
    pub limit: i64,
    pub offset: i64,
}

fn query_value<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query.get(key).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Validate the query string of a ledger list endpoint. Filters that do
/// not apply to `kind` are ignored, mirroring the per-entity contracts.
pub fn validate_list_query(
    kind: EntryKind,
    query: &HashMap<String, String>,
) -> CoreResult<ListSpec> {
    let mut errors: Vec<String> = Vec::new();

    let month = match query_value(query, "month") {
        Some(raw) => Month::parse(raw),
        None => None,
    };
    if month.is_none() {
        errors.push("month is required in YYYY-MM format.".into());
    }

    let q = match query_value(query, "q") {
        Some(text) if text.chars().count() > SEARCH_MAX => {
            errors.push(format!("q must be at most {} characters.", SEARCH_MAX));
            None
        }
        Some(text) => Some(text.to_string()),
        None => None,
    };

    let category = if kind.has_category() {
        query_value(query, "category").map(|s| s.to_string())
    } else {
        None
    };

    let expense_type = if kind == EntryKind::Expense {
        match query_value(query, "type") {
            Some(raw) => match raw.parse::<ExpenseType>() {
                Ok(parsed) => Some(parsed),
                Err(message) => {
                    errors.push(message);
                    None
                }
            },
            None => None,
        }
    } else {
        None
    };

    let method = match query_value(query, "method") {
        Some(raw) => match raw.parse::<PaymentMethod>() {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.push(message);
                None
            }
        },
        None => None,
    };

    let movement_type = if kind == EntryKind::Reserve {
        match query_value(query, "movement_type") {
            Some(raw) => match raw.parse::<ReserveMovement>() {
                Ok(parsed) => Some(parsed),
                Err(message) => {
                    errors.push(message);
                    None
                }
            },
            None => None,
        }
    } else {
        None
    };

    let limit = match query_value(query, "limit") {
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) if (1..=LIST_LIMIT_MAX).contains(&value) => value,
            _ => {
                errors.push(format!(
                    "limit must be an integer between 1 and {}.",
                    LIST_LIMIT_MAX
                ));
                LIST_LIMIT_DEFAULT
            }
        },
        None => LIST_LIMIT_DEFAULT,
    };

    let offset = match query_value(query, "offset") {
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) if value >= 0 => value,
            _ => {
                errors.push("offset must be an integer greater than or equal to zero.".into());
                0
            }
        },
        None => 0,
    };

    match month {
        Some(month) if errors.is_empty() => Ok(ListSpec {
            month,
            q,
            category,
            expense_type,
            method,
            movement_type,
            limit,
            offset,
        }),
        _ => Err(CoreError::validation(errors.join(" "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_expense_payload() -> EntryPayload {
        EntryPayload {
            date: Some("2024-05-10".to_string()),
            amount: Some(42.505),
            description: Some("  Groceries  ".to_string()),
            category_id: Some(3),
            expense_type: Some("Essencial".to_string()),
            movement_type: None,
            method: Some("Pix".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_full_expense_valid() {
        let change = validate_entry(
            EntryKind::Expense,
            &full_expense_payload(),
            ValidationMode::Full,
        )
        .unwrap();
        assert_eq!(change.date.unwrap().to_string(), "2024-05-10");
        assert_eq!(change.amount, Some(42.51));
        assert_eq!(change.description.as_deref(), Some("Groceries"));
        assert_eq!(change.expense_type, Some(ExpenseType::Essencial));
        assert_eq!(change.method, Some(PaymentMethod::Pix));
        // full mode with absent notes stores null
        assert_eq!(change.notes, Some(None));

        let entry = change.into_entry(EntryKind::Expense).unwrap();
        assert_eq!(entry.category_id, Some(3));
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_full_mode_requires_everything() {
        let err = validate_entry(
            EntryKind::Expense,
            &EntryPayload::default(),
            ValidationMode::Full,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("date is required."));
        assert!(message.contains("amount is required."));
        assert!(message.contains("description is required."));
        assert!(message.contains("category_id is required."));
        assert!(message.contains("type is required."));
        assert!(message.contains("method is required."));
    }

    #[test]
    fn test_calendar_invalid_date_rejected() {
        let mut payload = full_expense_payload();
        payload.date = Some("2024-04-31".to_string());
        assert!(validate_entry(EntryKind::Expense, &payload, ValidationMode::Full).is_err());

        payload.date = Some("2023-02-29".to_string());
        assert!(validate_entry(EntryKind::Expense, &payload, ValidationMode::Full).is_err());

        // unpadded dates fail the round-trip check
        payload.date = Some("2024-4-01".to_string());
        assert!(validate_entry(EntryKind::Expense, &payload, ValidationMode::Full).is_err());

        payload.date = Some("2024-02-29".to_string());
        assert!(validate_entry(EntryKind::Expense, &payload, ValidationMode::Full).is_ok());
    }

    #[test]
    fn test_amount_must_be_positive() {
        let mut payload = full_expense_payload();
        payload.amount = Some(0.0);
        assert!(validate_entry(EntryKind::Expense, &payload, ValidationMode::Full).is_err());
        payload.amount = Some(-5.0);
        assert!(validate_entry(EntryKind::Expense, &payload, ValidationMode::Full).is_err());
    }

    #[test]
    fn test_partial_single_field() {
        let payload = EntryPayload {
            amount: Some(50.0),
            ..EntryPayload::default()
        };
        let change = validate_entry(EntryKind::Expense, &payload, ValidationMode::Partial).unwrap();
        assert_eq!(change.amount, Some(50.0));
        assert!(change.date.is_none());
        assert!(change.notes.is_none());
    }

    #[test]
    fn test_partial_empty_rejected() {
        let err = validate_entry(
            EntryKind::Expense,
            &EntryPayload::default(),
            ValidationMode::Partial,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no valid fields"));
    }

    #[test]
    fn test_notes_tri_state() {
        // explicit null clears
        let payload = EntryPayload {
            notes: Some(None),
            ..EntryPayload::default()
        };
        let change = validate_entry(EntryKind::Expense, &payload, ValidationMode::Partial).unwrap();
        assert_eq!(change.notes, Some(None));

        // blank string clears too
        let payload = EntryPayload {
            notes: Some(Some("   ".to_string())),
            ..EntryPayload::default()
        };
        let change = validate_entry(EntryKind::Expense, &payload, ValidationMode::Partial).unwrap();
        assert_eq!(change.notes, Some(None));

        // non-empty is stored trimmed
        let payload = EntryPayload {
            notes: Some(Some("  remember this  ".to_string())),
            ..EntryPayload::default()
        };
        let change = validate_entry(EntryKind::Expense, &payload, ValidationMode::Partial).unwrap();
        assert_eq!(change.notes, Some(Some("remember this".to_string())));

        // oversized rejected
        let payload = EntryPayload {
            notes: Some(Some("x".repeat(NOTES_MAX + 1))),
            ..EntryPayload::default()
        };
        assert!(validate_entry(EntryKind::Expense, &payload, ValidationMode::Partial).is_err());
    }

    #[test]
    fn test_notes_deserialization_states() {
        let absent: EntryPayload = serde_json::from_str(r#"{"amount": 5.0}"#).unwrap();
        assert_eq!(absent.notes, None);

        let null: EntryPayload = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(null.notes, Some(None));

        let set: EntryPayload = serde_json::from_str(r#"{"notes": "hi"}"#).unwrap();
        assert_eq!(set.notes, Some(Some("hi".to_string())));
    }

    #[test]
    fn test_income_ignores_type_reserve_ignores_category() {
        let payload = EntryPayload {
            date: Some("2024-05-10".to_string()),
            amount: Some(10.0),
            description: Some("Paycheck".to_string()),
            category_id: Some(1),
            expense_type: Some("Lazer".to_string()),
            method: Some("Pix".to_string()),
            ..EntryPayload::default()
        };
        let change = validate_entry(EntryKind::Income, &payload, ValidationMode::Full).unwrap();
        assert!(change.expense_type.is_none());

        let payload = EntryPayload {
            date: Some("2024-05-10".to_string()),
            amount: Some(10.0),
            description: Some("Emergency fund".to_string()),
            category_id: Some(9),
            movement_type: Some("contribution".to_string()),
            method: Some("Pix".to_string()),
            ..EntryPayload::default()
        };
        let change = validate_entry(EntryKind::Reserve, &payload, ValidationMode::Full).unwrap();
        assert!(change.category_id.is_none());
        assert_eq!(change.movement_type, Some(ReserveMovement::Contribution));
    }

    #[test]
    fn test_merge_preserves_untouched_fields() {
        let stored = StoredEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            amount: 42.0,
            description: "Groceries".to_string(),
            category_id: Some(3),
            expense_type: Some(ExpenseType::Essencial),
            movement_type: None,
            method: PaymentMethod::Pix,
            notes: Some("weekly run".to_string()),
        };

        let change = EntryChange {
            amount: Some(50.0),
            ..EntryChange::default()
        };
        let merged = stored.merged_with(&change);
        assert_eq!(merged.amount, 50.0);
        assert_eq!(merged.date, stored.date);
        assert_eq!(merged.description, "Groceries");
        assert_eq!(merged.category_id, Some(3));
        assert_eq!(merged.expense_type, Some(ExpenseType::Essencial));
        assert_eq!(merged.method, PaymentMethod::Pix);
        assert_eq!(merged.notes, Some("weekly run".to_string()));

        // explicit clear wins; absent preserves
        let clear = EntryChange {
            notes: Some(None),
            ..EntryChange::default()
        };
        assert_eq!(stored.merged_with(&clear).notes, None);
        let untouched = EntryChange::default();
        assert_eq!(
            stored.merged_with(&untouched).notes,
            Some("weekly run".to_string())
        );
    }

    #[test]
    fn test_settings_validation() {
        let payload = SettingsPayload {
            net_salary: Some(3000.0),
            ..SettingsPayload::default()
        };
        let change = validate_settings(&payload, ValidationMode::Partial).unwrap();
        assert_eq!(change.net_salary, Some(3000.0));
        assert!(change.payday_day.is_none());

        let empty = validate_settings(&SettingsPayload::default(), ValidationMode::Partial);
        assert!(empty.is_err());

        let bad_payday = SettingsPayload {
            payday_day: Some(29),
            ..SettingsPayload::default()
        };
        assert!(validate_settings(&bad_payday, ValidationMode::Partial).is_err());

        let negative = SettingsPayload {
            monthly_budget: Some(-1.0),
            ..SettingsPayload::default()
        };
        assert!(validate_settings(&negative, ValidationMode::Partial).is_err());
    }

    #[test]
    fn test_monthly_income_requires_both_fields() {
        let payload = MonthlyIncomePayload {
            net_salary: Some(5000.0),
            extra_income: None,
        };
        assert!(validate_monthly_income(&payload).is_err());

        let payload = MonthlyIncomePayload {
            net_salary: Some(5000.009),
            extra_income: Some(0.0),
        };
        assert_eq!(validate_monthly_income(&payload).unwrap(), (5000.01, 0.0));
    }

    #[test]
    fn test_category_validation() {
        assert!(validate_category(&CategoryPayload { name: None }).is_err());
        assert!(validate_category(&CategoryPayload {
            name: Some("a".to_string())
        })
        .is_err());
        assert_eq!(
            validate_category(&CategoryPayload {
                name: Some("  Food  ".to_string())
            })
            .unwrap(),
            "Food"
        );
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_list_query_defaults() {
        let spec = validate_list_query(EntryKind::Expense, &query(&[("month", "2024-05")])).unwrap();
        assert_eq!(spec.limit, LIST_LIMIT_DEFAULT);
        assert_eq!(spec.offset, 0);
        assert!(spec.q.is_none());
        assert!(spec.expense_type.is_none());
    }

    #[test]
    fn test_list_query_month_required() {
        assert!(validate_list_query(EntryKind::Expense, &query(&[])).is_err());
        assert!(validate_list_query(EntryKind::Expense, &query(&[("month", "2024-5")])).is_err());
    }

    #[test]
    fn test_list_query_limit_bounds() {
        assert!(
            validate_list_query(EntryKind::Expense, &query(&[("month", "2024-05"), ("limit", "0")]))
                .is_err()
        );
        assert!(validate_list_query(
            EntryKind::Expense,
            &query(&[("month", "2024-05"), ("limit", "101")])
        )
        .is_err());
        assert!(validate_list_query(
            EntryKind::Expense,
            &query(&[("month", "2024-05"), ("offset", "-1")])
        )
        .is_err());
        let spec = validate_list_query(
            EntryKind::Expense,
            &query(&[("month", "2024-05"), ("limit", "100"), ("offset", "40")]),
        )
        .unwrap();
        assert_eq!(spec.limit, 100);
        assert_eq!(spec.offset, 40);
    }

    #[test]
    fn test_list_query_kind_specific_filters() {
        let spec = validate_list_query(
            EntryKind::Expense,
            &query(&[("month", "2024-05"), ("type", "Lazer"), ("category", "7")]),
        )
        .unwrap();
        assert_eq!(spec.expense_type, Some(ExpenseType::Lazer));
        assert_eq!(spec.category.as_deref(), Some("7"));

        // incomes have no type dimension: the parameter is ignored
        let spec = validate_list_query(
            EntryKind::Income,
            &query(&[("month", "2024-05"), ("type", "Lazer")]),
        )
        .unwrap();
        assert!(spec.expense_type.is_none());

        let spec = validate_list_query(
            EntryKind::Reserve,
            &query(&[("month", "2024-05"), ("movement_type", "withdrawal")]),
        )
        .unwrap();
        assert_eq!(spec.movement_type, Some(ReserveMovement::Withdrawal));

        assert!(validate_list_query(
            EntryKind::Expense,
            &query(&[("month", "2024-05"), ("type", "Nope")])
        )
        .is_err());
    }
}
