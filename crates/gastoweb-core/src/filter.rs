//! Typed ledger filters
//!
//! A filter is an ordered list of tagged clauses built once per logical
//! query and handed verbatim to every statement evaluated under it, so
//! COUNT, paginated LIST and SUM/GROUP-BY aggregates always agree. The
//! storage layer compiles clauses into parameterized SQL; values are
//! never spliced into query text.

use chrono::NaiveDate;

use crate::types::{ExpenseType, PaymentMethod, ReserveMovement};

/// One clause of a ledger filter; absent clauses are simply omitted
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Half-open `[start, end)` date window
    DateRange { start: NaiveDate, end: NaiveDate },
    ExpenseType(ExpenseType),
    /// All-digit category tokens match by id
    CategoryId(i64),
    /// Any other category token matches the name case-insensitively
    CategoryName(String),
    Method(PaymentMethod),
    Movement(ReserveMovement),
    /// Case-insensitive substring over description OR notes
    Text(String),
}

/// An ANDed set of filter clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    clauses: Vec<FilterClause>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.clauses.push(FilterClause::DateRange { start, end });
        self
    }

    pub fn expense_type(mut self, expense_type: Option<ExpenseType>) -> Self {
        if let Some(expense_type) = expense_type {
            self.clauses.push(FilterClause::ExpenseType(expense_type));
        }
        self
    }

    /// Category token rule: all-digits matches by numeric id, anything
    /// else matches the category name case-insensitively.
    pub fn category_token(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            let clause = if token.chars().all(|c| c.is_ascii_digit()) {
                match token.parse::<i64>() {
                    Ok(id) => FilterClause::CategoryId(id),
                    Err(_) => FilterClause::CategoryName(token.to_string()),
                }
            } else {
                FilterClause::CategoryName(token.to_string())
            };
            self.clauses.push(clause);
        }
        self
    }

    pub fn method(mut self, method: Option<PaymentMethod>) -> Self {
        if let Some(method) = method {
            self.clauses.push(FilterClause::Method(method));
        }
        self
    }

    pub fn movement(mut self, movement: Option<ReserveMovement>) -> Self {
        if let Some(movement) = movement {
            self.clauses.push(FilterClause::Movement(movement));
        }
        self
    }

    pub fn text(mut self, query: Option<&str>) -> Self {
        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            self.clauses.push(FilterClause::Text(query.to_string()));
        }
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_token_digits_match_by_id() {
        let filter = EntryFilter::new().category_token(Some("12"));
        assert_eq!(filter.clauses(), vec![FilterClause::CategoryId(12)]);
    }

    #[test]
    fn test_category_token_text_matches_by_name() {
        let filter = EntryFilter::new().category_token(Some("Food"));
        assert_eq!(
            filter.clauses(),
            vec![FilterClause::CategoryName("Food".to_string())]
        );
        // mixed tokens are names, not ids
        let filter = EntryFilter::new().category_token(Some("12a"));
        assert_eq!(
            filter.clauses(),
            vec![FilterClause::CategoryName("12a".to_string())]
        );
    }

    #[test]
    fn test_absent_clauses_are_omitted() {
        let filter = EntryFilter::new()
            .expense_type(None)
            .category_token(None)
            .category_token(Some("  "))
            .method(None)
            .text(None)
            .text(Some(""));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_clause_order_is_preserved() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let filter = EntryFilter::new()
            .date_range(start, end)
            .expense_type(Some(ExpenseType::Lazer))
            .text(Some("coffee"));
        assert_eq!(filter.clauses().len(), 3);
        assert!(matches!(
            filter.clauses()[0],
            FilterClause::DateRange { .. }
        ));
        assert!(matches!(filter.clauses()[2], FilterClause::Text(_)));
    }
}
