//! Public surface consumed by the transport layer.
//!
//! Plain async functions over [`ServiceDeps`]; each returns a typed result
//! or an [`crate::common::AuthError`].

pub mod login;
pub mod password;
pub mod phone_binding;
pub mod refresh;
pub mod send_code;
pub mod signup;

pub use login::sms_login;
pub use password::{password_login, reset_password};
pub use phone_binding::{bind_phone, unbind_phone};
pub use refresh::{refresh_user_token, verify_access_token};
pub use send_code::send_sms_code;
pub use signup::sms_signup;
