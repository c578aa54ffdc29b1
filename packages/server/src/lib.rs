// Credential Service - API Core
//
// This crate issues and validates short-lived credentials: SMS one-time
// codes, bearer access/refresh token pairs, and OAuth2 authorization-code
// grants, all bound to an account identity in Postgres.
//
// The REST transport calls the plain async functions exposed from
// domains/*/actions and domains/oauth/grant.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
