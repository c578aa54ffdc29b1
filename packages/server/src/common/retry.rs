//! Optimistic retry for unique-constraint collisions.
//!
//! Token and id generation never pre-locks: generate a candidate, attempt
//! the write, and let the store's unique constraint arbitrate. Collisions
//! are rare, so a small fixed bound is enough; exhausting it is reported as
//! a transient failure.

use std::future::Future;

use tracing::debug;

use super::error::{AuthError, AuthResult};

/// Attempts shared by every generate-and-attempt loop in the crate.
pub const MAX_UNIQUE_ATTEMPTS: u32 = 10;

/// Run `attempt` until it returns something other than a unique-constraint
/// collision, up to `max_attempts` times. Each invocation is expected to
/// generate a fresh candidate value internally.
pub async fn retry_unique<T, F, Fut>(max_attempts: u32, mut attempt: F) -> AuthResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AuthResult<T>>,
{
    for attempt_no in 1..=max_attempts {
        match attempt().await {
            Err(AuthError::Database(err)) if is_unique_violation(&err) => {
                debug!(attempt = attempt_no, "unique collision, regenerating candidate");
            }
            other => return other,
        }
    }
    Err(AuthError::ServerBusy)
}

/// True when the error is a violated unique constraint (duplicate key).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Name of the violated unique constraint, for call sites that must retry
/// one collision class and surface another.
pub fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => db.constraint(),
        _ => None,
    }
}
