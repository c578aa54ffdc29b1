use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{AuthError, AuthResult};

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // Subject (account id)
    pub exp: i64,     // Expiration timestamp
    pub iat: i64,     // Issued at timestamp
    pub iss: String,  // Issuer
    pub jti: String,  // Random nonce; makes every token unique per issuance
}

/// JWT Service - creates and verifies signed access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl JwtService {
    /// Create new JWT service with an injected secret and issuer
    pub fn new(secret: &str, issuer: String, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl_secs,
        }
    }

    /// Sign a new access token for an account.
    ///
    /// A signing failure means the key material is misconfigured; it is not
    /// retried.
    pub fn create_token(&self, account_id: &str) -> AuthResult<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::seconds(self.ttl_secs);

        let claims = Claims {
            sub: account_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::Signing)
    }

    /// Verify and decode an access token
    ///
    /// Returns claims if the token is valid, unexpired, and ours.
    pub fn verify_token(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthenticated)
    }
}
