//! Bind/unbind phone actions

use tracing::info;

use crate::common::{is_unique_violation, phone_digest, AuthError, AuthResult};
use crate::domains::account::models::{Account, PhoneAccount};
use crate::domains::auth::code_manager;
use crate::domains::auth::models::SmsScene;
use crate::kernel::ServiceDeps;

/// Attach a phone to an account after validating an account-scoped code.
pub async fn bind_phone(
    account_id: &str,
    phone: &str,
    code: &str,
    deps: &ServiceDeps,
) -> AuthResult<()> {
    code_manager::validate_code(SmsScene::BindPhone, phone, code, Some(account_id), deps).await?;

    let digest = phone_digest(phone);
    let mut tx = deps.db_pool.begin().await?;

    match PhoneAccount::insert(&digest, account_id, &mut tx).await {
        Err(AuthError::Database(err)) if is_unique_violation(&err) => {
            return Err(AuthError::AlreadyExists("phone binding"));
        }
        other => other?,
    }
    match Account::set_phone_digest(account_id, Some(digest.as_str()), &mut tx).await {
        Err(AuthError::Database(err)) if is_unique_violation(&err) => {
            return Err(AuthError::AlreadyExists("phone binding"));
        }
        other => {
            other?;
        }
    }

    tx.commit().await?;
    info!(%account_id, "phone bound");
    Ok(())
}

/// Detach a phone from an account after validating an account-scoped code.
pub async fn unbind_phone(
    account_id: &str,
    phone: &str,
    code: &str,
    deps: &ServiceDeps,
) -> AuthResult<()> {
    code_manager::validate_code(SmsScene::UnbindPhone, phone, code, Some(account_id), deps)
        .await?;

    let digest = phone_digest(phone);
    let mut tx = deps.db_pool.begin().await?;

    let removed = PhoneAccount::delete(&digest, account_id, &mut tx).await?;
    if removed == 0 {
        return Err(AuthError::NotFound("phone binding"));
    }
    Account::set_phone_digest(account_id, None, &mut tx).await?;

    tx.commit().await?;
    info!(%account_id, "phone unbound");
    Ok(())
}
