//! Integration tests for phone binding and password maintenance.

mod common;

use common::{fixtures, TestHarness};
use server_core::common::{phone_digest, AuthError};
use server_core::domains::account::models::{Account, PhoneAccount};
use server_core::domains::auth::actions::{
    bind_phone, password_login, reset_password, send_sms_code, unbind_phone,
};
use server_core::domains::auth::code_manager;
use server_core::domains::auth::models::SmsScene;
use test_context::test_context;

// ============================================================================
// Bind / Unbind Phone
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_bind_phone_attaches_binding(ctx: &TestHarness) {
    let original_phone = fixtures::unique_phone();
    let account_id = fixtures::create_test_account(&original_phone, &ctx.db_pool).await;

    let new_phone = fixtures::unique_phone();
    send_sms_code(
        SmsScene::BindPhone,
        &new_phone,
        None,
        None,
        Some(account_id.as_str()),
        &ctx.deps,
    )
    .await
    .unwrap();
    let code = ctx.sms.last_code(&new_phone).unwrap();

    bind_phone(&account_id, &new_phone, &code, &ctx.deps)
        .await
        .unwrap();

    let binding = PhoneAccount::find_by_phone(&phone_digest(&new_phone), &ctx.db_pool)
        .await
        .unwrap()
        .expect("binding should exist");
    assert_eq!(binding.account_id, account_id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_bind_code_is_scoped_to_account(ctx: &TestHarness) {
    let account_id = fixtures::create_test_account(&fixtures::unique_phone(), &ctx.db_pool).await;
    let intruder_id = fixtures::create_test_account(&fixtures::unique_phone(), &ctx.db_pool).await;

    let new_phone = fixtures::unique_phone();
    send_sms_code(
        SmsScene::BindPhone,
        &new_phone,
        None,
        None,
        Some(account_id.as_str()),
        &ctx.deps,
    )
    .await
    .unwrap();
    let code = ctx.sms.last_code(&new_phone).unwrap();

    // Another account cannot consume a code issued for this one.
    let result = code_manager::validate_code(
        SmsScene::BindPhone,
        &new_phone,
        &code,
        Some(intruder_id.as_str()),
        &ctx.deps,
    )
    .await;
    assert!(matches!(result, Err(AuthError::InvalidCode)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_bind_already_bound_phone_conflicts(ctx: &TestHarness) {
    let bound_phone = fixtures::unique_phone();
    fixtures::create_test_account(&bound_phone, &ctx.db_pool).await;
    let account_id = fixtures::create_test_account(&fixtures::unique_phone(), &ctx.db_pool).await;

    send_sms_code(
        SmsScene::BindPhone,
        &bound_phone,
        None,
        None,
        Some(account_id.as_str()),
        &ctx.deps,
    )
    .await
    .unwrap();
    let code = ctx.sms.last_code(&bound_phone).unwrap();

    let result = bind_phone(&account_id, &bound_phone, &code, &ctx.deps).await;
    assert!(matches!(result, Err(AuthError::AlreadyExists(_))));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_unbind_phone_removes_binding(ctx: &TestHarness) {
    let phone = fixtures::unique_phone();
    let account_id = fixtures::create_test_account(&phone, &ctx.db_pool).await;

    send_sms_code(
        SmsScene::UnbindPhone,
        &phone,
        None,
        None,
        Some(account_id.as_str()),
        &ctx.deps,
    )
    .await
    .unwrap();
    let code = ctx.sms.last_code(&phone).unwrap();

    unbind_phone(&account_id, &phone, &code, &ctx.deps)
        .await
        .unwrap();

    assert!(PhoneAccount::find_by_phone(&phone_digest(&phone), &ctx.db_pool)
        .await
        .unwrap()
        .is_none());

    let account = Account::find_by_id(&account_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(account.phone_digest.is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_unbind_foreign_phone_is_not_found(ctx: &TestHarness) {
    let phone = fixtures::unique_phone();
    fixtures::create_test_account(&phone, &ctx.db_pool).await;
    let other_id = fixtures::create_test_account(&fixtures::unique_phone(), &ctx.db_pool).await;

    send_sms_code(
        SmsScene::UnbindPhone,
        &phone,
        None,
        None,
        Some(other_id.as_str()),
        &ctx.deps,
    )
    .await
    .unwrap();
    let code = ctx.sms.last_code(&phone).unwrap();

    // The phone belongs to someone else; the binding does not match.
    let result = unbind_phone(&other_id, &phone, &code, &ctx.deps).await;
    assert!(matches!(result, Err(AuthError::NotFound(_))));
}

// ============================================================================
// Password Reset + Login
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_reset_then_password_login(ctx: &TestHarness) {
    let phone = fixtures::unique_phone();
    let account_id = fixtures::create_test_account(&phone, &ctx.db_pool).await;

    send_sms_code(SmsScene::ResetPassword, &phone, None, None, None, &ctx.deps)
        .await
        .unwrap();
    let code = ctx.sms.last_code(&phone).unwrap();

    reset_password(&phone, &code, "a-fresh-password", &ctx.deps)
        .await
        .unwrap();

    let token = password_login(&phone, "a-fresh-password", &ctx.deps)
        .await
        .unwrap();
    let claims = ctx.deps.jwt_service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, account_id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_reset_bumps_update_version(ctx: &TestHarness) {
    let phone = fixtures::unique_phone();
    let account_id = fixtures::create_test_account(&phone, &ctx.db_pool).await;

    let before = Account::find_by_id(&account_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();

    send_sms_code(SmsScene::ResetPassword, &phone, None, None, None, &ctx.deps)
        .await
        .unwrap();
    let code = ctx.sms.last_code(&phone).unwrap();
    reset_password(&phone, &code, "another-password", &ctx.deps)
        .await
        .unwrap();

    let after = Account::find_by_id(&account_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.update_version, before.update_version + 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_password_login_failures_are_uniform(ctx: &TestHarness) {
    let phone = fixtures::unique_phone();
    fixtures::create_test_account(&phone, &ctx.db_pool).await;

    // No password set yet.
    let unset = password_login(&phone, "anything", &ctx.deps).await;
    assert!(matches!(unset, Err(AuthError::Unauthenticated)));

    send_sms_code(SmsScene::ResetPassword, &phone, None, None, None, &ctx.deps)
        .await
        .unwrap();
    let code = ctx.sms.last_code(&phone).unwrap();
    reset_password(&phone, &code, "real-password", &ctx.deps)
        .await
        .unwrap();

    // Wrong password.
    let wrong = password_login(&phone, "wrong-password", &ctx.deps).await;
    assert!(matches!(wrong, Err(AuthError::Unauthenticated)));

    // Unknown phone.
    let unknown = password_login(&fixtures::unique_phone(), "real-password", &ctx.deps).await;
    assert!(matches!(unknown, Err(AuthError::Unauthenticated)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_reset_for_unbound_phone_is_not_found(ctx: &TestHarness) {
    let phone = fixtures::unique_phone();

    send_sms_code(SmsScene::ResetPassword, &phone, None, None, None, &ctx.deps)
        .await
        .unwrap();
    let code = ctx.sms.last_code(&phone).unwrap();

    let result = reset_password(&phone, &code, "whatever", &ctx.deps).await;
    assert!(matches!(result, Err(AuthError::NotFound(_))));
}
