use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AuthResult;

/// AccessToken - audit row for every signed token handed out
///
/// Expiry is enforced by the signature's `exp` claim, not by deleting rows.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccessToken {
    pub id: i64,
    pub account_id: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    pub async fn insert(account_id: &str, token: &str, pool: &PgPool) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO access_tokens (account_id, token)
             VALUES ($1, $2)",
        )
        .bind(account_id)
        .bind(token)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn count_for_account(account_id: &str, pool: &PgPool) -> AuthResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM access_tokens WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
