//! Auth domain - SMS one-time codes and user token issuance
//!
//! Responsibilities:
//! - One-time code generation, delivery, and validation per (scene, phone)
//! - Signed access tokens and rotating refresh tokens
//! - The SMS login/signup and account-maintenance surface

pub mod actions;
pub mod code_manager;
pub mod issuer;
pub mod jwt;
pub mod models;

pub use issuer::UserToken;
pub use jwt::{Claims, JwtService};
pub use models::SmsScene;
