pub mod access_token;
pub mod refresh_token;
pub mod sms_code;

pub use access_token::AccessToken;
pub use refresh_token::RefreshToken;
pub use sms_code::{SmsCode, SmsScene, SMS_CODE_TTL_SECS};
