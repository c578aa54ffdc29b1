use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AuthResult;

/// OauthAccessToken - opaque bearer token issued to a client
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OauthAccessToken {
    pub id: i64,
    pub client_id: String,
    pub account_id: String,
    pub scope: String,
    pub token: String,
    pub expires_in: i64,
    pub created_at: DateTime<Utc>,
}

impl OauthAccessToken {
    pub async fn insert(
        client_id: &str,
        account_id: &str,
        scope: &str,
        token: &str,
        expires_in: i64,
        pool: &PgPool,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO oauth_access_tokens (client_id, account_id, scope, token, expires_in)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(client_id)
        .bind(account_id)
        .bind(scope)
        .bind(token)
        .bind(expires_in)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_token(token: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let row = sqlx::query_as::<_, OauthAccessToken>(
            "SELECT * FROM oauth_access_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

/// OauthRefreshToken - long-lived token backing the refresh grant
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OauthRefreshToken {
    pub id: i64,
    pub client_id: String,
    pub account_id: String,
    pub scope: String,
    pub token: String,
    pub expires_in: i64,
    pub created_at: DateTime<Utc>,
}

impl OauthRefreshToken {
    pub async fn insert(
        client_id: &str,
        account_id: &str,
        scope: &str,
        token: &str,
        expires_in: i64,
        pool: &PgPool,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO oauth_refresh_tokens (client_id, account_id, scope, token, expires_in)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(client_id)
        .bind(account_id)
        .bind(scope)
        .bind(token)
        .bind(expires_in)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_token(token: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let row = sqlx::query_as::<_, OauthRefreshToken>(
            "SELECT * FROM oauth_refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Swap the stored token value during rotation.
    pub async fn rotate_value(id: i64, token: &str, pool: &PgPool) -> AuthResult<()> {
        sqlx::query("UPDATE oauth_refresh_tokens SET token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }
}
