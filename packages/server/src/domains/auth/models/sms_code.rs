use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AuthError, AuthResult};

/// Codes are valid for five minutes from insertion.
pub const SMS_CODE_TTL_SECS: i64 = 300;

/// Context a one-time code is scoped to. A login code can never satisfy a
/// bind-phone validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsScene {
    Signup,
    Login,
    BindPhone,
    UnbindPhone,
    ResetPassword,
}

impl SmsScene {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsScene::Signup => "signup",
            SmsScene::Login => "login",
            SmsScene::BindPhone => "bind_phone",
            SmsScene::UnbindPhone => "unbind_phone",
            SmsScene::ResetPassword => "reset_password",
        }
    }
}

impl fmt::Display for SmsScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmsScene {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(SmsScene::Signup),
            "login" => Ok(SmsScene::Login),
            "bind_phone" => Ok(SmsScene::BindPhone),
            "unbind_phone" => Ok(SmsScene::UnbindPhone),
            "reset_password" => Ok(SmsScene::ResetPassword),
            other => Err(AuthError::InvalidParam(format!("unknown scene: {}", other))),
        }
    }
}

/// SmsCode - an issued one-time code
///
/// Rows are insert-only; validation reads the newest matching row and
/// ignores the rest. Old rows are never invalidated, they just age out.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SmsCode {
    pub id: i64,
    pub scene: String,
    pub phone_digest: String,
    pub account_id: Option<String>,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl SmsCode {
    pub async fn insert(
        scene: SmsScene,
        phone_digest: &str,
        account_id: Option<&str>,
        code: &str,
        pool: &PgPool,
    ) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO sms_codes (scene, phone_digest, account_id, code)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(scene.as_str())
        .bind(phone_digest)
        .bind(account_id)
        .bind(code)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Most recently inserted row for the key; only this row is ever
    /// honored by validation (last write wins).
    pub async fn find_latest(
        scene: SmsScene,
        phone_digest: &str,
        account_id: Option<&str>,
        pool: &PgPool,
    ) -> AuthResult<Option<Self>> {
        let row = sqlx::query_as::<_, SmsCode>(
            "SELECT * FROM sms_codes
             WHERE scene = $1 AND phone_digest = $2
               AND ($3::text IS NULL OR account_id = $3)
             ORDER BY id DESC
             LIMIT 1",
        )
        .bind(scene.as_str())
        .bind(phone_digest)
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}
