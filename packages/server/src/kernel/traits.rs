// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The code
// manager decides what to send and when; implementations only deliver.

use async_trait::async_trait;
use smsgate::SmsError;

#[async_trait]
pub trait BaseSmsSender: Send + Sync {
    /// Deliver a one-time code to `phone`, returning the provider request id.
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, SmsError>;
}
