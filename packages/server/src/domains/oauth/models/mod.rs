pub mod authorization_code;
pub mod client;
pub mod token;

pub use authorization_code::AuthorizationCode;
pub use client::OauthClient;
pub use token::{OauthAccessToken, OauthRefreshToken};
