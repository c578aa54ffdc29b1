use sqlx::PgPool;
use tracing::warn;

/// A masked audit record of a credential operation.
///
/// Phone numbers arrive pre-masked; the log never sees raw identifiers.
#[derive(Debug, Clone)]
pub struct OperationRecord {
    pub account_id: Option<String>,
    pub action: &'static str,
    pub phone_masked: String,
    pub scene: Option<String>,
    pub detail: Option<String>,
    pub succeeded: bool,
}

/// Best-effort operation log backed by the `operation_logs` table.
///
/// Appends are fire-and-forget: a failed insert is reported at `warn` and
/// the primary call proceeds untouched.
#[derive(Clone)]
pub struct OperationLog {
    pool: PgPool,
}

impl OperationLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn append(&self, record: OperationRecord) {
        let result = sqlx::query(
            "INSERT INTO operation_logs (account_id, action, phone_masked, scene, detail, succeeded)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&record.account_id)
        .bind(record.action)
        .bind(&record.phone_masked)
        .bind(&record.scene)
        .bind(&record.detail)
        .bind(record.succeeded)
        .execute(&self.pool)
        .await;

        if let Err(err) = result {
            warn!(action = record.action, "operation log append failed: {}", err);
        }
    }
}
