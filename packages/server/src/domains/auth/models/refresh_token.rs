use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AuthResult;

/// RefreshToken - one active row per account, rotated in place
///
/// `account_id` and `token` each carry a unique constraint; issuance relies
/// on both to arbitrate concurrent rotations.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshToken {
    pub account_id: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Swap the stored token for `token`; returns 0 when no row exists yet.
    pub async fn rotate(account_id: &str, token: &str, pool: &PgPool) -> AuthResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET token = $2, updated_at = now()
             WHERE account_id = $1",
        )
        .bind(account_id)
        .bind(token)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert(account_id: &str, token: &str, pool: &PgPool) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (account_id, token)
             VALUES ($1, $2)",
        )
        .bind(account_id)
        .bind(token)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_token(token: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let row =
            sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
                .bind(token)
                .fetch_optional(pool)
                .await?;
        Ok(row)
    }

    pub async fn find_by_account(account_id: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let row = sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}
