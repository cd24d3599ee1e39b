//! Settings singleton and monthly income override queries

use gastoweb_core::{round2, CoreResult, MonthlyIncome, SettingsChange, StoredSettings};
use sqlx::sqlite::SqliteRow;

use crate::error::{col, map_sqlx_err};
use crate::SqliteStore;

fn settings_from_row(row: &SqliteRow) -> CoreResult<StoredSettings> {
    Ok(StoredSettings {
        net_salary: round2(col(row, "net_salary")?),
        extra_income: round2(col(row, "extra_income")?),
        monthly_budget: round2(col(row, "monthly_budget")?),
        payday_day: col(row, "payday_day")?,
        updated_at: col(row, "updated_at")?,
    })
}

fn monthly_income_from_row(row: &SqliteRow) -> CoreResult<MonthlyIncome> {
    Ok(MonthlyIncome {
        month: col(row, "month")?,
        net_salary: round2(col(row, "net_salary")?),
        extra_income: round2(col(row, "extra_income")?),
        updated_at: col(row, "updated_at")?,
    })
}

impl SqliteStore {
    /// Idempotent create-if-absent of the settings singleton. Uses the
    /// store's native upsert so concurrent first access cannot race.
    pub async fn ensure_settings(&self) -> CoreResult<()> {
        sqlx::query("INSERT INTO settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }

    pub async fn load_settings(&self) -> CoreResult<StoredSettings> {
        self.ensure_settings().await?;
        let row = sqlx::query(
            "SELECT net_salary, extra_income, monthly_budget, payday_day, updated_at \
             FROM settings WHERE id = 1",
        )
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        settings_from_row(&row)
    }

    /// Merge payload-present fields over the current singleton row
    pub async fn update_settings(&self, change: &SettingsChange) -> CoreResult<StoredSettings> {
        let current = self.load_settings().await?;
        sqlx::query(
            "UPDATE settings SET net_salary = ?, extra_income = ?, monthly_budget = ?, \
             payday_day = ?, updated_at = datetime('now') WHERE id = 1",
        )
        .bind(change.net_salary.unwrap_or(current.net_salary))
        .bind(change.extra_income.unwrap_or(current.extra_income))
        .bind(change.monthly_budget.unwrap_or(current.monthly_budget))
        .bind(change.payday_day.unwrap_or(current.payday_day))
        .execute(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        self.load_settings().await
    }

    pub async fn monthly_income(&self, month: &str) -> CoreResult<Option<MonthlyIncome>> {
        let row = sqlx::query(
            "SELECT month, net_salary, extra_income, updated_at \
             FROM monthly_income WHERE month = ?",
        )
        .bind(month)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        row.as_ref().map(monthly_income_from_row).transpose()
    }

    /// Most recent overrides, newest month first
    pub async fn list_monthly_incomes(&self, limit: i64) -> CoreResult<Vec<MonthlyIncome>> {
        let rows = sqlx::query(
            "SELECT month, net_salary, extra_income, updated_at \
             FROM monthly_income ORDER BY month DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        rows.iter().map(monthly_income_from_row).collect()
    }

    pub async fn upsert_monthly_income(
        &self,
        month: &str,
        net_salary: f64,
        extra_income: f64,
    ) -> CoreResult<MonthlyIncome> {
        let row = sqlx::query(
            "INSERT INTO monthly_income (month, net_salary, extra_income) VALUES (?, ?, ?) \
             ON CONFLICT (month) DO UPDATE SET \
                 net_salary = excluded.net_salary, \
                 extra_income = excluded.extra_income, \
                 updated_at = datetime('now') \
             RETURNING month, net_salary, extra_income, updated_at",
        )
        .bind(month)
        .bind(net_salary)
        .bind(extra_income)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_err)?;
        monthly_income_from_row(&row)
    }

    /// Remove the override for `month`; reverts that month to defaults
    pub async fn delete_monthly_income(&self, month: &str) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM monthly_income WHERE month = ?")
            .bind(month)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
