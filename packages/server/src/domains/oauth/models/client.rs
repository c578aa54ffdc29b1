use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AuthResult;

/// OauthClient - a registered OAuth2 client application
///
/// Serves as the typed principal for every grant-engine call after login;
/// the password hash is argon2id and never leaves this struct's queries.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OauthClient {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub redirect_uri: String,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
}

impl OauthClient {
    pub async fn find_by_client_id(client_id: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let client =
            sqlx::query_as::<_, OauthClient>("SELECT * FROM oauth_clients WHERE client_id = $1")
                .bind(client_id)
                .fetch_optional(pool)
                .await?;
        Ok(client)
    }

    /// Register a client (used by provisioning and test fixtures).
    pub async fn create(
        client_id: &str,
        password_hash: &str,
        redirect_uri: &str,
        account_id: &str,
        pool: &PgPool,
    ) -> AuthResult<Self> {
        let client = sqlx::query_as::<_, OauthClient>(
            "INSERT INTO oauth_clients (client_id, password_hash, redirect_uri, account_id)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(client_id)
        .bind(password_hash)
        .bind(redirect_uri)
        .bind(account_id)
        .fetch_one(pool)
        .await?;
        Ok(client)
    }
}
