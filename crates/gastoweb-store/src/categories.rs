//! Category queries

use gastoweb_core::{CategoryRecord, CoreError, CoreResult};
use sqlx::sqlite::SqliteRow;

use crate::error::{col, map_sqlx_err};
use crate::SqliteStore;

fn category_from_row(row: &SqliteRow) -> CoreResult<CategoryRecord> {
    Ok(CategoryRecord {
        id: col(row, "id")?,
        name: col(row, "name")?,
        created_at: col(row, "created_at")?,
    })
}

impl SqliteStore {
    pub async fn list_categories(&self) -> CoreResult<Vec<CategoryRecord>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM categories ORDER BY name ASC")
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_err)?;
        rows.iter().map(category_from_row).collect()
    }

    pub async fn create_category(&self, name: &str) -> CoreResult<CategoryRecord> {
        let row = sqlx::query("INSERT INTO categories (name) VALUES (?) RETURNING id, name, created_at")
            .bind(name)
            .fetch_one(self.pool())
            .await
            .map_err(|err| match map_sqlx_err(err) {
                CoreError::Conflict { .. } => CoreError::Conflict {
                    message: "Category already exists.".to_string(),
                },
                other => other,
            })?;
        category_from_row(&row)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::memory_store;
    use gastoweb_core::CoreError;

    #[tokio::test]
    async fn test_create_and_list_sorted_by_name() {
        let store = memory_store().await;
        store.create_category("Transporte").await.unwrap();
        store.create_category("Mercado").await.unwrap();

        let categories = store.list_categories().await.unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Mercado", "Transporte"]);
        assert!(categories[0].id > 0);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let store = memory_store().await;
        store.create_category("Mercado").await.unwrap();
        let err = store.create_category("Mercado").await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict { .. }));
        assert_eq!(err.to_string(), "Category already exists.");
    }
}
