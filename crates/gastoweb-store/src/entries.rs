//! Ledger entry CRUD
//!
//! Expenses and incomes join their category on every read; reserves are
//! an independent ledger. Updates fetch the current row, overlay the
//! validated change in the domain layer, and write the merged row back
//! in a single statement.

use chrono::NaiveDate;
use gastoweb_core::{
    round2, CoreError, CoreResult, EntryChange, EntryFilter, ExpenseRecord, IncomeRecord,
    ReserveRecord, StoredEntry,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite};

use crate::error::{col, map_sqlx_err, parse_stored};
use crate::filter_sql::apply_filter;
use crate::SqliteStore;

const EXPENSE_SELECT: &str = "SELECT e.id, e.date, e.amount, e.description, e.category_id, \
     c.name AS category_name, e.type, e.method, e.notes, e.created_at, e.updated_at \
     FROM expenses e JOIN categories c ON c.id = e.category_id";

const INCOME_SELECT: &str = "SELECT i.id, i.date, i.amount, i.description, i.category_id, \
     c.name AS category_name, i.method, i.notes, i.created_at, i.updated_at \
     FROM incomes i JOIN categories c ON c.id = i.category_id";

const RESERVE_SELECT: &str = "SELECT r.id, r.date, r.amount, r.description, r.movement_type, \
     r.method, r.notes, r.created_at, r.updated_at FROM reserves r";

fn parse_stored_date(raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CoreError::internal(format!("corrupt stored date: {}", raw)))
}

fn expense_from_row(row: &SqliteRow) -> CoreResult<ExpenseRecord> {
    Ok(ExpenseRecord {
        id: col(row, "id")?,
        date: col(row, "date")?,
        amount: round2(col(row, "amount")?),
        description: col(row, "description")?,
        category_id: col(row, "category_id")?,
        category_name: col(row, "category_name")?,
        expense_type: parse_stored(col::<String>(row, "type")?)?,
        method: parse_stored(col::<String>(row, "method")?)?,
        notes: col(row, "notes")?,
        created_at: col(row, "created_at")?,
        updated_at: col(row, "updated_at")?,
    })
}

fn income_from_row(row: &SqliteRow) -> CoreResult<IncomeRecord> {
    Ok(IncomeRecord {
        id: col(row, "id")?,
        date: col(row, "date")?,
        amount: round2(col(row, "amount")?),
        description: col(row, "description")?,
        category_id: col(row, "category_id")?,
        category_name: col(row, "category_name")?,
        method: parse_stored(col::<String>(row, "method")?)?,
        notes: col(row, "notes")?,
        created_at: col(row, "created_at")?,
        updated_at: col(row, "updated_at")?,
    })
}

fn reserve_from_row(row: &SqliteRow) -> CoreResult<ReserveRecord> {
    Ok(ReserveRecord {
        id: col(row, "id")?,
        date: col(row, "date")?,
        amount: round2(col(row, "amount")?),
        description: col(row, "description")?,
        movement_type: parse_stored(col::<String>(row, "movement_type")?)?,
        method: parse_stored(col::<String>(row, "method")?)?,
        notes: col(row, "notes")?,
        created_at: col(row, "created_at")?,
        updated_at: col(row, "updated_at")?,
    })
}

fn require_category(entry: &StoredEntry) -> CoreResult<i64> {
    entry
        .category_id
        .ok_or_else(|| CoreError::internal("entry is missing its category_id"))
}

// ==================== Expenses ====================

impl SqliteStore {
    pub async fn count_expenses(&self, filter: &EntryFilter) -> CoreResult<i64> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT COUNT(*) FROM expenses e JOIN categories c ON c.id = e.category_id",
        );
        apply_filter(&mut builder, filter, "e", Some("c"));
        builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_err)
    }

    pub async fn list_expenses(
        &self,
        filter: &EntryFilter,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<ExpenseRecord>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(EXPENSE_SELECT);
        apply_filter(&mut builder, filter, "e", Some("c"));
        builder.push(" ORDER BY e.date DESC, e.id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter().map(expense_from_row).collect()
    }

    pub async fn fetch_expense(&self, id: i64) -> CoreResult<Option<ExpenseRecord>> {
        let sql = format!("{} WHERE e.id = ?", EXPENSE_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref().map(expense_from_row).transpose()
    }

    pub async fn create_expense(&self, entry: &StoredEntry) -> CoreResult<ExpenseRecord> {
        let expense_type = entry
            .expense_type
            .ok_or_else(|| CoreError::internal("expense is missing its type"))?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO expenses (date, amount, description, category_id, type, method, notes) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(entry.date.to_string())
        .bind(entry.amount)
        .bind(&entry.description)
        .bind(require_category(entry)?)
        .bind(expense_type.as_str())
        .bind(entry.method.as_str())
        .bind(entry.notes.as_deref())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        self.fetch_expense(id)
            .await?
            .ok_or_else(|| CoreError::internal("inserted expense not found"))
    }

    async fn expense_entry(&self, id: i64) -> CoreResult<Option<StoredEntry>> {
        let row = sqlx::query(
            "SELECT date, amount, description, category_id, type, method, notes \
             FROM expenses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        row.map(|row| {
            Ok(StoredEntry {
                date: parse_stored_date(&col::<String>(&row, "date")?)?,
                amount: round2(col(&row, "amount")?),
                description: col(&row, "description")?,
                category_id: Some(col(&row, "category_id")?),
                expense_type: Some(parse_stored(col::<String>(&row, "type")?)?),
                movement_type: None,
                method: parse_stored(col::<String>(&row, "method")?)?,
                notes: col(&row, "notes")?,
            })
        })
        .transpose()
    }

    pub async fn update_expense(
        &self,
        id: i64,
        change: &EntryChange,
    ) -> CoreResult<ExpenseRecord> {
        let current = self
            .expense_entry(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Expense"))?;
        let merged = current.merged_with(change);
        let expense_type = merged
            .expense_type
            .ok_or_else(|| CoreError::internal("expense is missing its type"))?;

        sqlx::query(
            "UPDATE expenses SET date = ?, amount = ?, description = ?, category_id = ?, \
             type = ?, method = ?, notes = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(merged.date.to_string())
        .bind(merged.amount)
        .bind(&merged.description)
        .bind(require_category(&merged)?)
        .bind(expense_type.as_str())
        .bind(merged.method.as_str())
        .bind(merged.notes.as_deref())
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        self.fetch_expense(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Expense"))
    }

    pub async fn delete_expense(&self, id: i64) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}

// ==================== Incomes ====================

impl SqliteStore {
    pub async fn count_incomes(&self, filter: &EntryFilter) -> CoreResult<i64> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT COUNT(*) FROM incomes i JOIN categories c ON c.id = i.category_id",
        );
        apply_filter(&mut builder, filter, "i", Some("c"));
        builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_err)
    }

    pub async fn list_incomes(
        &self,
        filter: &EntryFilter,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<IncomeRecord>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(INCOME_SELECT);
        apply_filter(&mut builder, filter, "i", Some("c"));
        builder.push(" ORDER BY i.date DESC, i.id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter().map(income_from_row).collect()
    }

    pub async fn fetch_income(&self, id: i64) -> CoreResult<Option<IncomeRecord>> {
        let sql = format!("{} WHERE i.id = ?", INCOME_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref().map(income_from_row).transpose()
    }

    pub async fn create_income(&self, entry: &StoredEntry) -> CoreResult<IncomeRecord> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO incomes (date, amount, description, category_id, method, notes) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(entry.date.to_string())
        .bind(entry.amount)
        .bind(&entry.description)
        .bind(require_category(entry)?)
        .bind(entry.method.as_str())
        .bind(entry.notes.as_deref())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        self.fetch_income(id)
            .await?
            .ok_or_else(|| CoreError::internal("inserted income not found"))
    }

    async fn income_entry(&self, id: i64) -> CoreResult<Option<StoredEntry>> {
        let row = sqlx::query(
            "SELECT date, amount, description, category_id, method, notes \
             FROM incomes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        row.map(|row| {
            Ok(StoredEntry {
                date: parse_stored_date(&col::<String>(&row, "date")?)?,
                amount: round2(col(&row, "amount")?),
                description: col(&row, "description")?,
                category_id: Some(col(&row, "category_id")?),
                expense_type: None,
                movement_type: None,
                method: parse_stored(col::<String>(&row, "method")?)?,
                notes: col(&row, "notes")?,
            })
        })
        .transpose()
    }

    pub async fn update_income(&self, id: i64, change: &EntryChange) -> CoreResult<IncomeRecord> {
        let current = self
            .income_entry(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Income"))?;
        let merged = current.merged_with(change);

        sqlx::query(
            "UPDATE incomes SET date = ?, amount = ?, description = ?, category_id = ?, \
             method = ?, notes = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(merged.date.to_string())
        .bind(merged.amount)
        .bind(&merged.description)
        .bind(require_category(&merged)?)
        .bind(merged.method.as_str())
        .bind(merged.notes.as_deref())
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        self.fetch_income(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Income"))
    }

    pub async fn delete_income(&self, id: i64) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM incomes WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}

// ==================== Reserves ====================

impl SqliteStore {
    pub async fn count_reserves(&self, filter: &EntryFilter) -> CoreResult<i64> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM reserves r");
        apply_filter(&mut builder, filter, "r", None);
        builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_err)
    }

    pub async fn list_reserves(
        &self,
        filter: &EntryFilter,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<ReserveRecord>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(RESERVE_SELECT);
        apply_filter(&mut builder, filter, "r", None);
        builder.push(" ORDER BY r.date DESC, r.id DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter().map(reserve_from_row).collect()
    }

    pub async fn fetch_reserve(&self, id: i64) -> CoreResult<Option<ReserveRecord>> {
        let sql = format!("{} WHERE r.id = ?", RESERVE_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref().map(reserve_from_row).transpose()
    }

    pub async fn create_reserve(&self, entry: &StoredEntry) -> CoreResult<ReserveRecord> {
        let movement = entry
            .movement_type
            .ok_or_else(|| CoreError::internal("reserve is missing its movement_type"))?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO reserves (date, amount, description, movement_type, method, notes) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(entry.date.to_string())
        .bind(entry.amount)
        .bind(&entry.description)
        .bind(movement.as_str())
        .bind(entry.method.as_str())
        .bind(entry.notes.as_deref())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        self.fetch_reserve(id)
            .await?
            .ok_or_else(|| CoreError::internal("inserted reserve not found"))
    }

    async fn reserve_entry(&self, id: i64) -> CoreResult<Option<StoredEntry>> {
        let row = sqlx::query(
            "SELECT date, amount, description, movement_type, method, notes \
             FROM reserves WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        row.map(|row| {
            Ok(StoredEntry {
                date: parse_stored_date(&col::<String>(&row, "date")?)?,
                amount: round2(col(&row, "amount")?),
                description: col(&row, "description")?,
                category_id: None,
                expense_type: None,
                movement_type: Some(parse_stored(col::<String>(&row, "movement_type")?)?),
                method: parse_stored(col::<String>(&row, "method")?)?,
                notes: col(&row, "notes")?,
            })
        })
        .transpose()
    }

    pub async fn update_reserve(&self, id: i64, change: &EntryChange) -> CoreResult<ReserveRecord> {
        let current = self
            .reserve_entry(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Reserve"))?;
        let merged = current.merged_with(change);
        let movement = merged
            .movement_type
            .ok_or_else(|| CoreError::internal("reserve is missing its movement_type"))?;

        sqlx::query(
            "UPDATE reserves SET date = ?, amount = ?, description = ?, movement_type = ?, \
             method = ?, notes = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(merged.date.to_string())
        .bind(merged.amount)
        .bind(&merged.description)
        .bind(movement.as_str())
        .bind(merged.method.as_str())
        .bind(merged.notes.as_deref())
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;

        self.fetch_reserve(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Reserve"))
    }

    pub async fn delete_reserve(&self, id: i64) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM reserves WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
