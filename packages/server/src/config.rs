use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Signing secret for user access tokens. Always injected, never a
    /// compile-time constant.
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub access_token_ttl_secs: i64,
    pub sms_endpoint: String,
    pub sms_api_key: String,
    pub sms_sender_id: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "credential-service".to_string()),
            access_token_ttl_secs: env::var("ACCESS_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "7200".to_string())
                .parse()
                .context("ACCESS_TOKEN_TTL_SECS must be a valid number")?,
            sms_endpoint: env::var("SMS_ENDPOINT")
                .context("SMS_ENDPOINT must be set")?,
            sms_api_key: env::var("SMS_API_KEY")
                .context("SMS_API_KEY must be set")?,
            sms_sender_id: env::var("SMS_SENDER_ID")
                .unwrap_or_else(|_| "VERIFY".to_string()),
        })
    }
}
