pub mod account;
pub mod phone_account;
pub mod user_info;

pub use account::{generate_account_id, Account};
pub use phone_account::PhoneAccount;
pub use user_info::UserInfo;
