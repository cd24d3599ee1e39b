//! Aggregate queries feeding the dashboard metrics engine
//!
//! Every statement here reuses the same compiled predicate as the
//! count/list paths, so aggregates always agree with pagination under
//! one logical filter.

use async_trait::async_trait;
use gastoweb_core::{
    CategoryTotal, CoreResult, EntryFilter, ExpenseRecord, ExpenseType, LedgerStore,
    MonthlyIncome, StoredSettings,
};
use sqlx::{QueryBuilder, Sqlite};

use crate::error::{col, map_sqlx_err, parse_stored};
use crate::filter_sql::apply_filter;
use crate::SqliteStore;

const EXPENSE_FROM: &str = " FROM expenses e JOIN categories c ON c.id = e.category_id";
const INCOME_FROM: &str = " FROM incomes i JOIN categories c ON c.id = i.category_id";

impl SqliteStore {
    pub async fn sum_expenses(&self, filter: &EntryFilter) -> CoreResult<f64> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT COALESCE(SUM(e.amount), 0.0){}", EXPENSE_FROM));
        apply_filter(&mut builder, filter, "e", Some("c"));
        builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_err)
    }

    pub async fn sum_incomes(&self, filter: &EntryFilter) -> CoreResult<f64> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT COALESCE(SUM(i.amount), 0.0){}", INCOME_FROM));
        apply_filter(&mut builder, filter, "i", Some("c"));
        builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_err)
    }

    pub async fn expense_totals_by_type(
        &self,
        filter: &EntryFilter,
    ) -> CoreResult<Vec<(ExpenseType, f64)>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT e.type, COALESCE(SUM(e.amount), 0.0) AS total{}",
            EXPENSE_FROM
        ));
        apply_filter(&mut builder, filter, "e", Some("c"));
        builder.push(" GROUP BY e.type");
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter()
            .map(|row| {
                Ok((
                    parse_stored(col::<String>(row, "type")?)?,
                    col::<f64>(row, "total")?,
                ))
            })
            .collect()
    }

    pub async fn expense_totals_by_category(
        &self,
        filter: &EntryFilter,
        limit: i64,
    ) -> CoreResult<Vec<CategoryTotal>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT c.name AS category_name, COALESCE(SUM(e.amount), 0.0) AS total{}",
            EXPENSE_FROM
        ));
        apply_filter(&mut builder, filter, "e", Some("c"));
        builder.push(" GROUP BY c.name ORDER BY total DESC, c.name ASC LIMIT ");
        builder.push_bind(limit);
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter()
            .map(|row| {
                Ok(CategoryTotal {
                    category_name: col(row, "category_name")?,
                    total_spend: col(row, "total")?,
                })
            })
            .collect()
    }

    pub async fn expense_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT CAST(strftime('%d', e.date) AS INTEGER) AS day, \
             COALESCE(SUM(e.amount), 0.0) AS total{}",
            EXPENSE_FROM
        ));
        apply_filter(&mut builder, filter, "e", Some("c"));
        builder.push(" GROUP BY day ORDER BY day");
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter()
            .map(|row| Ok((col::<i64>(row, "day")? as u32, col::<f64>(row, "total")?)))
            .collect()
    }

    pub async fn income_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT CAST(strftime('%d', i.date) AS INTEGER) AS day, \
             COALESCE(SUM(i.amount), 0.0) AS total{}",
            INCOME_FROM
        ));
        apply_filter(&mut builder, filter, "i", Some("c"));
        builder.push(" GROUP BY day ORDER BY day");
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter()
            .map(|row| Ok((col::<i64>(row, "day")? as u32, col::<f64>(row, "total")?)))
            .collect()
    }

    pub async fn expense_monthly_totals(
        &self,
        filter: &EntryFilter,
    ) -> CoreResult<Vec<(String, f64)>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT strftime('%Y-%m', e.date) AS month, \
             COALESCE(SUM(e.amount), 0.0) AS total{}",
            EXPENSE_FROM
        ));
        apply_filter(&mut builder, filter, "e", Some("c"));
        builder.push(" GROUP BY month ORDER BY month");
        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter()
            .map(|row| Ok((col::<String>(row, "month")?, col::<f64>(row, "total")?)))
            .collect()
    }

    pub async fn latest_expenses(
        &self,
        filter: &EntryFilter,
        limit: i64,
    ) -> CoreResult<Vec<ExpenseRecord>> {
        self.list_expenses(filter, limit, 0).await
    }
}

#[async_trait]
impl LedgerStore for SqliteStore {
    async fn load_settings(&self) -> CoreResult<StoredSettings> {
        SqliteStore::load_settings(self).await
    }

    async fn monthly_income(&self, month: &str) -> CoreResult<Option<MonthlyIncome>> {
        SqliteStore::monthly_income(self, month).await
    }

    async fn sum_expenses(&self, filter: &EntryFilter) -> CoreResult<f64> {
        SqliteStore::sum_expenses(self, filter).await
    }

    async fn sum_incomes(&self, filter: &EntryFilter) -> CoreResult<f64> {
        SqliteStore::sum_incomes(self, filter).await
    }

    async fn expense_totals_by_type(
        &self,
        filter: &EntryFilter,
    ) -> CoreResult<Vec<(ExpenseType, f64)>> {
        SqliteStore::expense_totals_by_type(self, filter).await
    }

    async fn expense_totals_by_category(
        &self,
        filter: &EntryFilter,
        limit: i64,
    ) -> CoreResult<Vec<CategoryTotal>> {
        SqliteStore::expense_totals_by_category(self, filter, limit).await
    }

    async fn expense_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>> {
        SqliteStore::expense_daily_totals(self, filter).await
    }

    async fn income_daily_totals(&self, filter: &EntryFilter) -> CoreResult<Vec<(u32, f64)>> {
        SqliteStore::income_daily_totals(self, filter).await
    }

    async fn expense_monthly_totals(
        &self,
        filter: &EntryFilter,
    ) -> CoreResult<Vec<(String, f64)>> {
        SqliteStore::expense_monthly_totals(self, filter).await
    }

    async fn latest_expenses(
        &self,
        filter: &EntryFilter,
        limit: i64,
    ) -> CoreResult<Vec<ExpenseRecord>> {
        SqliteStore::latest_expenses(self, filter, limit).await
    }
}
