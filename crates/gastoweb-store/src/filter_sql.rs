//! Filter compilation
//!
//! Compiles a typed `EntryFilter` into a parameterized WHERE clause.
//! The same routine serves COUNT, paginated LIST and aggregate
//! statements for one logical filter, so they always see an identical
//! predicate. Filter values are always bound, never spliced into SQL.

use gastoweb_core::{EntryFilter, FilterClause};
use sqlx::{QueryBuilder, Sqlite};

/// Append the WHERE clause for `filter` to `builder`.
///
/// `alias` is the entry-table alias; `category_alias` names the joined
/// categories table when the statement has one.
pub fn apply_filter(
    builder: &mut QueryBuilder<'_, Sqlite>,
    filter: &EntryFilter,
    alias: &str,
    category_alias: Option<&str>,
) {
    let mut first = true;
    for clause in filter.clauses() {
        builder.push(if first { " WHERE " } else { " AND " });
        first = false;
        match clause {
            FilterClause::DateRange { start, end } => {
                builder.push(format!("{}.date >= ", alias));
                builder.push_bind(start.to_string());
                builder.push(format!(" AND {}.date < ", alias));
                builder.push_bind(end.to_string());
            }
            FilterClause::ExpenseType(expense_type) => {
                builder.push(format!("{}.type = ", alias));
                builder.push_bind(expense_type.as_str());
            }
            FilterClause::CategoryId(id) => {
                builder.push(format!("{}.category_id = ", alias));
                builder.push_bind(*id);
            }
            FilterClause::CategoryName(name) => {
                let category = category_alias.unwrap_or(alias);
                builder.push(format!("LOWER({}.name) = LOWER(", category));
                builder.push_bind(name.clone());
                builder.push(")");
            }
            FilterClause::Method(method) => {
                builder.push(format!("{}.method = ", alias));
                builder.push_bind(method.as_str());
            }
            FilterClause::Movement(movement) => {
                builder.push(format!("{}.movement_type = ", alias));
                builder.push_bind(movement.as_str());
            }
            FilterClause::Text(query) => {
                let needle = format!("%{}%", query.to_lowercase());
                builder.push(format!("(LOWER({}.description) LIKE ", alias));
                builder.push_bind(needle.clone());
                builder.push(format!(" OR LOWER(COALESCE({}.notes, '')) LIKE ", alias));
                builder.push_bind(needle);
                builder.push(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_filter_compiles_to_bound_parameters() {
        let filter = EntryFilter::new()
            .date_range(
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            )
            .category_token(Some("Food"))
            .text(Some("coffee"));
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM expenses e JOIN categories c ON c.id = e.category_id");
        apply_filter(&mut builder, &filter, "e", Some("c"));
        let sql = builder.sql();
        assert!(sql.contains("e.date >= ?"));
        assert!(sql.contains("e.date < ?"));
        assert!(sql.contains("LOWER(c.name) = LOWER(?)"));
        assert!(sql.contains("LOWER(e.description) LIKE ?"));
        // no filter value ever lands in the SQL text
        assert!(!sql.contains("Food"));
        assert!(!sql.contains("coffee"));
        assert!(!sql.contains("2024"));
    }

    #[test]
    fn test_empty_filter_adds_no_where() {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM reserves r");
        apply_filter(&mut builder, &EntryFilter::new(), "r", None);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM reserves r");
    }
}
