//! User token issuance.
//!
//! Access tokens are signed and logged; refresh tokens live in a single
//! per-account row rotated with update-then-insert. No in-process lock
//! guards the rotation - concurrent callers race freely and the unique
//! constraints plus bounded retry absorb the collisions.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use crate::common::retry::MAX_UNIQUE_ATTEMPTS;
use crate::common::{retry_unique, AuthResult};
use crate::kernel::ServiceDeps;

use super::models::{AccessToken, RefreshToken};

pub const REFRESH_TOKEN_LEN: usize = 32;

/// Access/refresh pair returned from login, signup, and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct UserToken {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn generate_refresh_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Sign an access token and record the issuance.
pub async fn create_access_token(account_id: &str, deps: &ServiceDeps) -> AuthResult<String> {
    let token = deps.jwt_service.create_token(account_id)?;
    AccessToken::insert(account_id, &token, &deps.db_pool).await?;
    Ok(token)
}

/// Rotate the account's refresh token, creating the row on first issuance.
///
/// UPDATE first; when no row was touched, INSERT. A duplicate-key collision
/// on either path (token value, or a concurrent first issuance hitting the
/// account unique key) regenerates and retries within the shared bound.
pub async fn create_refresh_token(account_id: &str, deps: &ServiceDeps) -> AuthResult<String> {
    let pool = deps.db_pool.clone();
    let account = account_id.to_string();

    retry_unique(MAX_UNIQUE_ATTEMPTS, move || {
        let pool = pool.clone();
        let account = account.clone();
        async move {
            let candidate = generate_refresh_token();
            let affected = RefreshToken::rotate(&account, &candidate, &pool).await?;
            if affected == 0 {
                RefreshToken::insert(&account, &candidate, &pool).await?;
            }
            Ok(candidate)
        }
    })
    .await
}

/// Issue a full access/refresh pair.
///
/// The access token is written first; a refresh-side failure leaves its
/// audit row in place with no compensation.
pub async fn create_user_token(account_id: &str, deps: &ServiceDeps) -> AuthResult<UserToken> {
    let access_token = create_access_token(account_id, deps).await?;
    let refresh_token = create_refresh_token(account_id, deps).await?;
    Ok(UserToken {
        access_token,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_tokens_are_alphanumeric() {
        let token = generate_refresh_token();
        assert_eq!(token.len(), REFRESH_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn refresh_tokens_vary() {
        assert_ne!(generate_refresh_token(), generate_refresh_token());
    }
}
