use sqlx::Row;
use shared::Therapist;

use super::connection::DbConnection;
use super::map_sqlx_error;
use crate::storage::traits::StoreError;

/// Repository for roster operations
#[derive(Clone)]
pub struct TherapistRepository {
    db: DbConnection,
}

impl TherapistRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a therapist; the primary key rejects duplicate names
    pub async fn store_therapist(&self, therapist: &Therapist) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO therapists (name)
            VALUES (?)
            "#,
        )
        .bind(&therapist.name)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// List all therapists ordered by name
    pub async fn list_therapists(&self) -> Result<Vec<Therapist>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT name
            FROM therapists
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .iter()
            .map(|row| Therapist { name: row.get("name") })
            .collect())
    }

    /// Delete a therapist by exact name; deleting an unknown name is not an error
    pub async fn delete_therapist(&self, name: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM therapists
            WHERE name = ?
            "#,
        )
        .bind(name)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }
}
