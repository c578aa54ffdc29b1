//! Test doubles for external collaborators.
//!
//! Kept in-tree (not behind cfg(test)) so the integration suite under
//! tests/ can reuse them.

use std::sync::Mutex;

use async_trait::async_trait;
use smsgate::SmsError;

use crate::kernel::traits::BaseSmsSender;

/// Records delivered codes instead of calling a vendor.
#[derive(Default)]
pub struct StubSmsSender {
    sent: Mutex<Vec<(String, String)>>,
    fail_with: Mutex<Option<SmsError>>,
}

impl StubSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next delivery fail with `err`.
    pub fn fail_next(&self, err: SmsError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    /// Last code delivered to `phone`, if any.
    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseSmsSender for StubSmsSender {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, SmsError> {
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((phone.to_string(), code.to_string()));
        Ok(format!("stub-req-{}", sent.len()))
    }
}
