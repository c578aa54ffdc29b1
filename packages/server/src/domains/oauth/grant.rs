//! OAuth2 grant engine.
//!
//! Three entry points: client login (authentication), authorize (code
//! issuance under a row lock), and token (exchange, dispatched on
//! grant_type). Codes are single-use: the row is consumed on the first
//! successful exchange and replay fails as an invalid parameter.

use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::common::{verify_password, AuthError, AuthResult};
use crate::kernel::ServiceDeps;

use super::models::{AuthorizationCode, OauthAccessToken, OauthClient, OauthRefreshToken};

pub const AUTHORIZATION_CODE_TTL_SECS: i64 = 600;
pub const OAUTH_ACCESS_TOKEN_TTL_SECS: i64 = 7200;
pub const OAUTH_REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;

const AUTHORIZATION_CODE_LEN: usize = 32;
const OAUTH_TOKEN_LEN: usize = 40;

pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

/// Token-endpoint request, already unmarshalled by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct TokenRequest {
    pub grant_type: String,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub refresh_token: Option<String>,
}

/// Pair returned from a successful exchange.
#[derive(Debug, Clone, Serialize)]
pub struct OauthTokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub scope: String,
}

fn generate_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Authenticate an OAuth2 client by id and password.
///
/// Unknown id and wrong password are indistinguishable to the caller.
pub async fn oauth2_client_login(
    client_id: &str,
    password: &str,
    deps: &ServiceDeps,
) -> AuthResult<OauthClient> {
    let client = OauthClient::find_by_client_id(client_id, &deps.db_pool)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    if !verify_password(password, &client.password_hash) {
        return Err(AuthError::Unauthenticated);
    }

    Ok(client)
}

/// Issue (or reissue) the authorization code for (client, account).
///
/// The pair's single row is locked for the duration of the transaction;
/// a concurrent authorize for the same pair waits and then overwrites.
pub async fn oauth_authorize(
    account_id: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
    deps: &ServiceDeps,
) -> AuthResult<String> {
    let code = generate_token(AUTHORIZATION_CODE_LEN);
    let mut tx = deps.db_pool.begin().await?;

    match AuthorizationCode::find_for_update(client_id, account_id, &mut tx).await? {
        Some(existing) => {
            AuthorizationCode::update_in_place(existing.id, &code, redirect_uri, scope, &mut tx)
                .await?;
        }
        None => {
            AuthorizationCode::insert(
                &code,
                client_id,
                account_id,
                redirect_uri,
                scope,
                AUTHORIZATION_CODE_TTL_SECS,
                &mut tx,
            )
            .await?;
        }
    }

    tx.commit().await?;
    info!(%client_id, %account_id, "authorization code issued");
    Ok(code)
}

/// Exchange endpoint, dispatched on `grant_type`.
pub async fn oauth2_token(
    request: &TokenRequest,
    client: &OauthClient,
    deps: &ServiceDeps,
) -> AuthResult<OauthTokenPair> {
    match request.grant_type.as_str() {
        GRANT_TYPE_AUTHORIZATION_CODE => exchange_authorization_code(request, client, deps).await,
        GRANT_TYPE_REFRESH_TOKEN => exchange_refresh_token(request, client, deps).await,
        _ => Err(AuthError::InvalidParam("UnknownType".to_string())),
    }
}

async fn exchange_authorization_code(
    request: &TokenRequest,
    client: &OauthClient,
    deps: &ServiceDeps,
) -> AuthResult<OauthTokenPair> {
    let code = request
        .code
        .as_deref()
        .ok_or_else(|| AuthError::InvalidParam("code".to_string()))?;

    let row = AuthorizationCode::find_by_code(code, &deps.db_pool)
        .await?
        .ok_or_else(|| AuthError::InvalidParam("code".to_string()))?;

    if row.client_id != client.client_id {
        return Err(AuthError::InvalidParam("client_id".to_string()));
    }
    // Byte-exact match; no URI normalization.
    if request.redirect_uri.as_deref() != Some(row.redirect_uri.as_str()) {
        return Err(AuthError::InvalidParam("redirect_uri".to_string()));
    }
    let age = Utc::now().signed_duration_since(row.updated_at);
    if age > Duration::seconds(row.expires_in) {
        return Err(AuthError::InvalidParam("code".to_string()));
    }

    let access_token = generate_token(OAUTH_TOKEN_LEN);
    let refresh_token = generate_token(OAUTH_TOKEN_LEN);

    OauthAccessToken::insert(
        &row.client_id,
        &row.account_id,
        &row.scope,
        &access_token,
        OAUTH_ACCESS_TOKEN_TTL_SECS,
        &deps.db_pool,
    )
    .await?;
    OauthRefreshToken::insert(
        &row.client_id,
        &row.account_id,
        &row.scope,
        &refresh_token,
        OAUTH_REFRESH_TOKEN_TTL_SECS,
        &deps.db_pool,
    )
    .await?;

    AuthorizationCode::delete_by_code(code, &deps.db_pool).await?;

    info!(client_id = %client.client_id, account_id = %row.account_id, "authorization code exchanged");
    Ok(OauthTokenPair {
        access_token,
        refresh_token,
        expires_in: OAUTH_ACCESS_TOKEN_TTL_SECS,
        scope: row.scope,
    })
}

async fn exchange_refresh_token(
    request: &TokenRequest,
    client: &OauthClient,
    deps: &ServiceDeps,
) -> AuthResult<OauthTokenPair> {
    let presented = request
        .refresh_token
        .as_deref()
        .ok_or_else(|| AuthError::InvalidParam("refresh_token".to_string()))?;

    let row = OauthRefreshToken::find_by_token(presented, &deps.db_pool)
        .await?
        .ok_or_else(|| AuthError::InvalidParam("refresh_token".to_string()))?;

    if row.client_id != client.client_id {
        return Err(AuthError::InvalidParam("client_id".to_string()));
    }
    let age = Utc::now().signed_duration_since(row.created_at);
    if age > Duration::seconds(row.expires_in) {
        return Err(AuthError::InvalidParam("refresh_token".to_string()));
    }

    let access_token = generate_token(OAUTH_TOKEN_LEN);
    OauthAccessToken::insert(
        &row.client_id,
        &row.account_id,
        &row.scope,
        &access_token,
        OAUTH_ACCESS_TOKEN_TTL_SECS,
        &deps.db_pool,
    )
    .await?;

    let rotated = generate_token(OAUTH_TOKEN_LEN);
    OauthRefreshToken::rotate_value(row.id, &rotated, &deps.db_pool).await?;

    info!(client_id = %client.client_id, account_id = %row.account_id, "refresh token exchanged");
    Ok(OauthTokenPair {
        access_token,
        refresh_token: rotated,
        expires_in: OAUTH_ACCESS_TOKEN_TTL_SECS,
        scope: row.scope,
    })
}
