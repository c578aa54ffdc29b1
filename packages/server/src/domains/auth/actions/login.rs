//! SMS login action

use tracing::info;

use crate::common::{phone_digest, AuthResult};
use crate::domains::account::resolver;
use crate::domains::auth::code_manager;
use crate::domains::auth::issuer::{self, UserToken};
use crate::domains::auth::models::SmsScene;
use crate::kernel::ServiceDeps;

/// Log in with a one-time code, lazily creating the account when the phone
/// has no binding yet.
pub async fn sms_login(phone: &str, code: &str, deps: &ServiceDeps) -> AuthResult<UserToken> {
    code_manager::validate_code(SmsScene::Login, phone, code, None, deps).await?;

    let digest = phone_digest(phone);
    let account_id = resolver::resolve_or_create_by_phone(&digest, &deps.db_pool).await?;

    let token = issuer::create_user_token(&account_id, deps).await?;
    info!(%account_id, "sms login succeeded");
    Ok(token)
}
