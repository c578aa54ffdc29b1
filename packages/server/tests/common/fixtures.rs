//! Shared fixtures for integration tests.
//!
//! The Postgres container is shared across a test binary, so fixtures hand
//! out process-unique phone numbers and client ids.

use std::sync::atomic::{AtomicU32, Ordering};

use sqlx::PgPool;

use server_core::common::{hash_password, phone_digest};
use server_core::domains::account::resolver;
use server_core::domains::auth::models::SmsScene;
use server_core::domains::oauth::models::OauthClient;

static SEQ: AtomicU32 = AtomicU32::new(0);

fn next_seq() -> u32 {
    SEQ.fetch_add(1, Ordering::Relaxed)
}

/// A test-unique E.164-looking phone number.
pub fn unique_phone() -> String {
    format!("+1612{:03}{:04}", std::process::id() % 1000, next_seq())
}

pub fn unique_client_id() -> String {
    format!("client-{}-{}", std::process::id(), next_seq())
}

/// Create an account bound to `phone`, returning its id.
pub async fn create_test_account(phone: &str, pool: &PgPool) -> String {
    resolver::resolve_or_create_by_phone(&phone_digest(phone), pool)
        .await
        .expect("failed to create test account")
}

/// Register an OAuth client with an argon2id-hashed password.
pub async fn create_test_client(
    client_id: &str,
    password: &str,
    redirect_uri: &str,
    account_id: &str,
    pool: &PgPool,
) -> OauthClient {
    let hash = hash_password(password).expect("failed to hash test password");
    OauthClient::create(client_id, &hash, redirect_uri, account_id, pool)
        .await
        .expect("failed to create test client")
}

/// Backdate the newest code row for (scene, phone) by `secs` seconds.
pub async fn age_latest_sms_code(scene: SmsScene, phone: &str, secs: i64, pool: &PgPool) {
    sqlx::query(
        "UPDATE sms_codes
         SET created_at = created_at - make_interval(secs => $3)
         WHERE id = (
             SELECT max(id) FROM sms_codes WHERE scene = $1 AND phone_digest = $2
         )",
    )
    .bind(scene.as_str())
    .bind(phone_digest(phone))
    .bind(secs as f64)
    .execute(pool)
    .await
    .expect("failed to age sms code");
}

/// Backdate an authorization code so it reads as expired.
pub async fn age_authorization_code(code: &str, secs: i64, pool: &PgPool) {
    sqlx::query(
        "UPDATE authorization_codes
         SET updated_at = updated_at - make_interval(secs => $2)
         WHERE code = $1",
    )
    .bind(code)
    .bind(secs as f64)
    .execute(pool)
    .await
    .expect("failed to age authorization code");
}
