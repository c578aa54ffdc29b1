//! Token refresh and verification actions

use crate::common::{AuthError, AuthResult};
use crate::domains::auth::issuer::{self, UserToken};
use crate::domains::auth::jwt::Claims;
use crate::domains::auth::models::RefreshToken;
use crate::kernel::ServiceDeps;

/// Exchange a refresh token for a fresh access/refresh pair.
///
/// Presenting an unknown token is an authentication failure; the rotation
/// itself invalidates the presented value.
pub async fn refresh_user_token(refresh_token: &str, deps: &ServiceDeps) -> AuthResult<UserToken> {
    let row = RefreshToken::find_by_token(refresh_token, &deps.db_pool)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    issuer::create_user_token(&row.account_id, deps).await
}

/// Verify a signed access token, returning its claims.
pub async fn verify_access_token(token: &str, deps: &ServiceDeps) -> AuthResult<Claims> {
    deps.jwt_service.verify_token(token)
}
