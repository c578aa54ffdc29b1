//! Password reset and password login actions

use tracing::info;

use crate::common::{hash_password, phone_digest, verify_password, AuthError, AuthResult};
use crate::domains::account::models::{Account, PhoneAccount};
use crate::domains::auth::code_manager;
use crate::domains::auth::issuer::{self, UserToken};
use crate::domains::auth::models::SmsScene;
use crate::kernel::ServiceDeps;

/// Set a new password after validating a reset code sent to the bound phone.
pub async fn reset_password(
    phone: &str,
    code: &str,
    new_password: &str,
    deps: &ServiceDeps,
) -> AuthResult<()> {
    code_manager::validate_code(SmsScene::ResetPassword, phone, code, None, deps).await?;

    let digest = phone_digest(phone);
    let binding = PhoneAccount::find_by_phone(&digest, &deps.db_pool)
        .await?
        .ok_or(AuthError::NotFound("account"))?;

    let hash = hash_password(new_password)?;
    Account::set_password_hash(&binding.account_id, &hash, &deps.db_pool).await?;

    info!(account_id = %binding.account_id, "password reset");
    Ok(())
}

/// Log in with phone + password.
///
/// Unknown phone, unset password, and mismatch all collapse into the same
/// `Unauthenticated` so callers cannot probe which phones are registered.
pub async fn password_login(
    phone: &str,
    password: &str,
    deps: &ServiceDeps,
) -> AuthResult<UserToken> {
    let digest = phone_digest(phone);
    let binding = PhoneAccount::find_by_phone(&digest, &deps.db_pool)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    let account = Account::find_by_id(&binding.account_id, &deps.db_pool)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    let hash = account.password_hash.ok_or(AuthError::Unauthenticated)?;
    if !verify_password(password, &hash) {
        return Err(AuthError::Unauthenticated);
    }

    issuer::create_user_token(&account.account_id, deps).await
}
