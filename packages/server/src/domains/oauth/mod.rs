//! OAuth2 domain - client credentials and the grant engine
//!
//! Responsibilities:
//! - Client authentication (id + password)
//! - Authorization-code issuance, one locked row per (client, account)
//! - Code and refresh-token exchange for OAuth token pairs

pub mod grant;
pub mod models;

pub use grant::{oauth2_client_login, oauth2_token, oauth_authorize, OauthTokenPair, TokenRequest};
