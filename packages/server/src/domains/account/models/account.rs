use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::AuthResult;

/// Account - the identity every credential is bound to
///
/// `account_id` is an opaque random numeric string. The phone digest is
/// duplicated here from the binding table so profile reads stay one query.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub account_id: String,
    pub phone_digest: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub update_version: i64,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Account {
    pub async fn find_by_id(account_id: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let account =
            sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE account_id = $1")
                .bind(account_id)
                .fetch_optional(pool)
                .await?;
        Ok(account)
    }

    /// Insert a fresh account row inside an open transaction.
    pub async fn insert_new(
        account_id: &str,
        phone_digest: Option<&str>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO accounts (account_id, phone_digest)
             VALUES ($1, $2)",
        )
        .bind(account_id)
        .bind(phone_digest)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Store a new password hash, bumping the optimistic version counter.
    pub async fn set_password_hash(
        account_id: &str,
        password_hash: &str,
        pool: &PgPool,
    ) -> AuthResult<u64> {
        let result = sqlx::query(
            "UPDATE accounts
             SET password_hash = $2, updated_at = now(), update_version = update_version + 1
             WHERE account_id = $1",
        )
        .bind(account_id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn set_phone_digest(
        account_id: &str,
        phone_digest: Option<&str>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<u64> {
        let result = sqlx::query(
            "UPDATE accounts
             SET phone_digest = $2, updated_at = now(), update_version = update_version + 1
             WHERE account_id = $1",
        )
        .bind(account_id)
        .bind(phone_digest)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Generate a random 12-digit account id.
///
/// Short enough that collisions are conceivable under load; callers retry
/// the insert with a fresh candidate when the primary key rejects one.
pub fn generate_account_id() -> String {
    rand::thread_rng()
        .gen_range(100_000_000_000u64..1_000_000_000_000u64)
        .to_string()
}
