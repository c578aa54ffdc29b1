//! One-time code lifecycle: generate, deliver, persist, validate.
//!
//! Every call, success or failure, appends a masked record to the operation
//! log; the log is best-effort and never fails the primary call.

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::debug;

use crate::common::{mask_phone, phone_digest, AuthError, AuthResult, OperationRecord};
use crate::kernel::ServiceDeps;

use super::models::{SmsCode, SmsScene, SMS_CODE_TTL_SECS};

pub const SMS_CODE_LEN: usize = 6;

/// Generate a fixed-length, zero-padded numeric code.
pub fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32))
}

/// Generate and deliver a one-time code, persisting it on successful
/// dispatch.
///
/// Captcha fields are accepted and recorded but not enforced.
pub async fn send_code(
    scene: SmsScene,
    phone: &str,
    captcha_id: Option<&str>,
    captcha_code: Option<&str>,
    account_id: Option<&str>,
    deps: &ServiceDeps,
) -> AuthResult<()> {
    let digest = phone_digest(phone);
    let code = generate_code();

    let outcome = async {
        let request_id = deps.sms.send_code(phone, &code).await?;
        debug!(%request_id, scene = %scene, "sms code dispatched");
        SmsCode::insert(scene, &digest, account_id, &code, &deps.db_pool).await?;
        Ok(())
    }
    .await;

    let detail = match (captcha_id, captcha_code) {
        (Some(id), Some(_)) => Some(format!("captcha_id={} (code supplied)", id)),
        (Some(id), None) => Some(format!("captcha_id={}", id)),
        _ => None,
    };
    deps.oplog
        .append(OperationRecord {
            account_id: account_id.map(str::to_string),
            action: "sms_code_send",
            phone_masked: mask_phone(phone),
            scene: Some(scene.as_str().to_string()),
            detail,
            succeeded: outcome.is_ok(),
        })
        .await;

    outcome
}

/// Validate a code against the newest matching row for (scene, phone).
///
/// Fails `InvalidCode` when no row exists, the code mismatches, or the row
/// is older than the TTL. Validation does not consume the row; within the
/// TTL the same code validates again.
pub async fn validate_code(
    scene: SmsScene,
    phone: &str,
    code: &str,
    account_id: Option<&str>,
    deps: &ServiceDeps,
) -> AuthResult<()> {
    let digest = phone_digest(phone);
    let outcome = validate_latest(scene, &digest, code, account_id, deps).await;

    deps.oplog
        .append(OperationRecord {
            account_id: account_id.map(str::to_string),
            action: "sms_code_validate",
            phone_masked: mask_phone(phone),
            scene: Some(scene.as_str().to_string()),
            detail: None,
            succeeded: outcome.is_ok(),
        })
        .await;

    outcome
}

async fn validate_latest(
    scene: SmsScene,
    phone_digest: &str,
    code: &str,
    account_id: Option<&str>,
    deps: &ServiceDeps,
) -> AuthResult<()> {
    let row = SmsCode::find_latest(scene, phone_digest, account_id, &deps.db_pool)
        .await?
        .ok_or(AuthError::InvalidCode)?;

    if row.code != code {
        return Err(AuthError::InvalidCode);
    }

    let age = Utc::now().signed_duration_since(row.created_at);
    if age > Duration::seconds(SMS_CODE_TTL_SECS) {
        return Err(AuthError::InvalidCode);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), SMS_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
