use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::AuthResult;

/// UserInfo - display profile created alongside every account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserInfo {
    pub account_id: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserInfo {
    pub async fn insert(
        account_id: &str,
        nickname: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO user_infos (account_id, nickname)
             VALUES ($1, $2)",
        )
        .bind(account_id)
        .bind(nickname)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn find_by_account(account_id: &str, pool: &PgPool) -> AuthResult<Option<Self>> {
        let info = sqlx::query_as::<_, UserInfo>("SELECT * FROM user_infos WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(pool)
            .await?;
        Ok(info)
    }
}
