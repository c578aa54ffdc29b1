//! SMS signup action

use tracing::info;

use crate::common::{phone_digest, AuthError, AuthResult};
use crate::domains::account::models::PhoneAccount;
use crate::domains::account::resolver;
use crate::domains::auth::code_manager;
use crate::domains::auth::issuer::{self, UserToken};
use crate::domains::auth::models::SmsScene;
use crate::kernel::ServiceDeps;

/// Sign up with a one-time code.
///
/// Unlike login, an existing binding is a conflict rather than a session.
pub async fn sms_signup(phone: &str, code: &str, deps: &ServiceDeps) -> AuthResult<UserToken> {
    code_manager::validate_code(SmsScene::Signup, phone, code, None, deps).await?;

    let digest = phone_digest(phone);
    if PhoneAccount::find_by_phone(&digest, &deps.db_pool).await?.is_some() {
        return Err(AuthError::AlreadyExists("account"));
    }

    let account_id = resolver::resolve_or_create_by_phone(&digest, &deps.db_pool).await?;

    let token = issuer::create_user_token(&account_id, deps).await?;
    info!(%account_id, "sms signup succeeded");
    Ok(token)
}
