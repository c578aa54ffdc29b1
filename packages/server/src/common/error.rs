use thiserror::Error;

/// Errors surfaced by the credential engine.
///
/// `InvalidCode`/`InvalidParam` and `Unauthenticated` are client faults,
/// `AlreadyExists` is a conflict, `ServerBusy` is transient and safe to
/// retry, `Signing` means the signing key is misconfigured and retrying
/// cannot help.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid or expired sms code")]
    InvalidCode,

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("authentication failed")]
    Unauthenticated,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    #[error("server busy, please retry")]
    ServerBusy,

    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("sms delivery failed: {0}")]
    Delivery(#[from] smsgate::SmsError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;
