use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::AuthResult;

/// PhoneAccount - maps a phone digest to its owning account
///
/// The primary key on `phone_digest` is what enforces "at most one account
/// per phone number".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PhoneAccount {
    pub phone_digest: String,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
}

impl PhoneAccount {
    pub async fn find_by_phone(phone_digest: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let binding = sqlx::query_as::<_, PhoneAccount>(
            "SELECT * FROM phone_accounts WHERE phone_digest = $1",
        )
        .bind(phone_digest)
        .fetch_optional(pool)
        .await?;
        Ok(binding)
    }

    pub async fn insert(
        phone_digest: &str,
        account_id: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO phone_accounts (phone_digest, account_id)
             VALUES ($1, $2)",
        )
        .bind(phone_digest)
        .bind(account_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Remove the binding; returns 0 when the digest is bound to a different
    /// account (or not bound at all).
    pub async fn delete(
        phone_digest: &str,
        account_id: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<u64> {
        let result = sqlx::query(
            "DELETE FROM phone_accounts WHERE phone_digest = $1 AND account_id = $2",
        )
        .bind(phone_digest)
        .bind(account_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}
