//! sqlx error mapping onto the domain taxonomy
//!
//! Unique violations become conflicts, foreign-key violations surface
//! as their own error (a missing category is not a validation problem),
//! check violations become constraint errors, and everything else is an
//! opaque internal fault.

use gastoweb_core::{CoreError, CoreResult};
use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Map a sqlx failure onto the domain error taxonomy
pub fn map_sqlx_err(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                return CoreError::Conflict {
                    message: "Record already exists.".to_string(),
                }
            }
            ErrorKind::ForeignKeyViolation => {
                return CoreError::ForeignKey {
                    message: "Referenced category does not exist.".to_string(),
                }
            }
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                return CoreError::Constraint {
                    message: "Value violates a storage constraint.".to_string(),
                }
            }
            _ => {}
        }
    }
    CoreError::Internal {
        detail: err.to_string(),
    }
}

/// Column accessor that folds decode failures into the taxonomy
pub(crate) fn col<'r, T>(row: &'r SqliteRow, name: &str) -> CoreResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name).map_err(map_sqlx_err)
}

/// Parse an enum column stored as text; failure means corrupt data
pub(crate) fn parse_stored<T>(raw: String) -> CoreResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse::<T>()
        .map_err(|message| CoreError::internal(format!("corrupt stored value: {}", message)))
}
