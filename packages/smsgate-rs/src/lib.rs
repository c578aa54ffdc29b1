//! Minimal client for the SMS gateway's message-dispatch API.
//!
//! Only the one-time-code delivery endpoint is wrapped here; signing and
//! template management stay on the vendor side.

pub mod models;

use reqwest::{header, Client, StatusCode};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{SendMessageResponse, VendorErrorResponse};

#[derive(Debug, Clone)]
pub struct SmsGateOptions {
    /// Base URL of the vendor API, e.g. `https://sms.example.com`.
    pub endpoint: String,
    pub api_key: String,
    /// Registered sender id the vendor expects in the `From` field.
    pub sender_id: String,
}

/// Delivery failures the caller can act on.
#[derive(Debug, Clone, Error)]
pub enum SmsError {
    #[error("sms provider rate limited the request")]
    RateLimited,
    #[error("recipient phone number rejected by provider")]
    InvalidPhone,
    #[error("sms provider error: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone)]
pub struct SmsGateService {
    options: SmsGateOptions,
    client: Client,
}

impl SmsGateService {
    pub fn new(options: SmsGateOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Deliver a one-time code to `recipient`, returning the vendor request id.
    pub async fn send_code(&self, recipient: &str, code: &str) -> Result<String, SmsError> {
        let url = format!(
            "{}/v1/messages",
            self.options.endpoint.trim_end_matches('/')
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "Content-Type",
            "application/x-www-form-urlencoded"
                .parse()
                .expect("Header value should parse correctly"),
        );

        let mut form_body: HashMap<&str, String> = HashMap::new();
        form_body.insert("To", recipient.to_string());
        form_body.insert("From", self.options.sender_id.clone());
        form_body.insert("Body", format!("Your verification code is {}", code));

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.options.api_key)
            .headers(headers)
            .form(&form_body)
            .send()
            .await
            .map_err(|e| SmsError::Unknown(format!("request failed: {}", e)))?;

        let status = res.status();
        if status.is_success() {
            return res
                .json::<SendMessageResponse>()
                .await
                .map(|body| body.request_id)
                .map_err(|e| SmsError::Unknown(format!("unparsable response: {}", e)));
        }

        // The vendor reports the rejection class both via status and a
        // machine-readable error code in the body.
        let body = res.json::<VendorErrorResponse>().await.ok();
        match status {
            StatusCode::TOO_MANY_REQUESTS => Err(SmsError::RateLimited),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
                if body
                    .as_ref()
                    .map(|b| b.code == "invalid_recipient")
                    .unwrap_or(false) =>
            {
                Err(SmsError::InvalidPhone)
            }
            _ => Err(SmsError::Unknown(
                body.map(|b| b.message)
                    .unwrap_or_else(|| format!("status {}", status)),
            )),
        }
    }
}
