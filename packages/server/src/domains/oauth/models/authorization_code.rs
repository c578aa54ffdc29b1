use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::AuthResult;

/// AuthorizationCode - one outstanding code per (client, account)
///
/// Re-authorization overwrites the row in place under a row lock rather
/// than inserting a second code for the pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthorizationCode {
    pub id: i64,
    pub code: String,
    pub client_id: String,
    pub account_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub expires_in: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthorizationCode {
    /// Fetch the pair's row with a row lock, within an open transaction.
    pub async fn find_for_update(
        client_id: &str,
        account_id: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<Option<Self>> {
        let row = sqlx::query_as::<_, AuthorizationCode>(
            "SELECT * FROM authorization_codes
             WHERE client_id = $1 AND account_id = $2
             FOR UPDATE",
        )
        .bind(client_id)
        .bind(account_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row)
    }

    pub async fn insert(
        code: &str,
        client_id: &str,
        account_id: &str,
        redirect_uri: &str,
        scope: &str,
        expires_in: i64,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO authorization_codes
                 (code, client_id, account_id, redirect_uri, scope, expires_in)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(code)
        .bind(client_id)
        .bind(account_id)
        .bind(redirect_uri)
        .bind(scope)
        .bind(expires_in)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Overwrite a locked row with a fresh code and the caller's redirect
    /// and scope.
    pub async fn update_in_place(
        id: i64,
        code: &str,
        redirect_uri: &str,
        scope: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<()> {
        sqlx::query(
            "UPDATE authorization_codes
             SET code = $2, redirect_uri = $3, scope = $4, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(code)
        .bind(redirect_uri)
        .bind(scope)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn find_by_code(code: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let row = sqlx::query_as::<_, AuthorizationCode>(
            "SELECT * FROM authorization_codes WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn find_by_pair(
        client_id: &str,
        account_id: &str,
        pool: &PgPool,
    ) -> AuthResult<Option<Self>> {
        let row = sqlx::query_as::<_, AuthorizationCode>(
            "SELECT * FROM authorization_codes WHERE client_id = $1 AND account_id = $2",
        )
        .bind(client_id)
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Consume a code after a successful exchange.
    pub async fn delete_by_code(code: &str, pool: &PgPool) -> AuthResult<u64> {
        let result = sqlx::query("DELETE FROM authorization_codes WHERE code = $1")
            .bind(code)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
