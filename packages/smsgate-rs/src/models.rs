use serde::{Deserialize, Serialize};

/// Successful dispatch acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub request_id: String,
    pub status: String,
}

/// Error body returned for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorErrorResponse {
    pub code: String,
    pub message: String,
}
