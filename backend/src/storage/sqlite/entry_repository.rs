use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use shared::{NewServiceEntry, PaymentBreakdown, StoredEntry};
use uuid::Uuid;

use super::connection::DbConnection;
use super::map_sqlx_error;
use crate::storage::traits::StoreError;

/// Repository for service entry operations
#[derive(Clone)]
pub struct EntryRepository {
    db: DbConnection,
}

impl EntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store an entry stamped with `created_at`; returns the generated ID
    pub async fn store_entry(
        &self,
        entry: &NewServiceEntry,
        created_at: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let payment = serde_json::to_string(&entry.payment)
            .map_err(|e| StoreError::Other(format!("Failed to encode payment: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO service_entries
                (id, bill_no, customer_name, phone_no, staff_name, in_time, out_time, payment, remarks, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&entry.bill_no)
        .bind(&entry.customer_name)
        .bind(&entry.phone_no)
        .bind(&entry.staff_name)
        .bind(&entry.in_time)
        .bind(&entry.out_time)
        .bind(payment)
        .bind(&entry.remarks)
        .bind(format_timestamp(created_at))
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(id)
    }

    /// List entries created at or after `since`, oldest first
    pub async fn list_entries_since(&self, since: DateTime<Utc>) -> Result<Vec<StoredEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, bill_no, customer_name, phone_no, staff_name, in_time, out_time, payment, remarks, created_at
            FROM service_entries
            WHERE created_at >= ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(format_timestamp(since))
        .fetch_all(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| -> Result<StoredEntry, StoreError> {
                let payment_json: String = row.get("payment");
                let payment: PaymentBreakdown = serde_json::from_str(&payment_json)
                    .map_err(|e| StoreError::Other(format!("Corrupt payment column: {}", e)))?;
                let created_at: String = row.get("created_at");
                let created_at = DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| StoreError::Other(format!("Corrupt created_at column: {}", e)))?
                    .with_timezone(&Utc);

                Ok(StoredEntry {
                    id: row.get("id"),
                    entry: NewServiceEntry {
                        bill_no: row.get("bill_no"),
                        customer_name: row.get("customer_name"),
                        phone_no: row.get("phone_no"),
                        staff_name: row.get("staff_name"),
                        in_time: row.get("in_time"),
                        out_time: row.get("out_time"),
                        payment,
                        remarks: row.get("remarks"),
                    },
                    created_at,
                })
            })
            .collect()
    }
}

/// Timestamps are stored as fixed-width UTC RFC 3339 so text comparison orders them
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
