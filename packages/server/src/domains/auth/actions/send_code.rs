//! Send SMS code action

use crate::common::AuthResult;
use crate::domains::auth::code_manager;
use crate::domains::auth::models::SmsScene;
use crate::kernel::ServiceDeps;

/// Generate and deliver a one-time code for `scene`.
///
/// `account_id` is the authenticated caller for account-scoped scenes
/// (bind/unbind); anonymous flows pass `None`. Captcha fields are accepted
/// but not enforced.
pub async fn send_sms_code(
    scene: SmsScene,
    phone: &str,
    captcha_id: Option<&str>,
    captcha_code: Option<&str>,
    account_id: Option<&str>,
    deps: &ServiceDeps,
) -> AuthResult<()> {
    code_manager::send_code(scene, phone, captcha_id, captcha_code, account_id, deps).await
}
