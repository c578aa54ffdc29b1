//! Service dependencies (using traits for testability)
//!
//! The central dependency container handed to every domain function. All
//! external collaborators sit behind trait objects so tests can swap them.

use std::sync::Arc;

use async_trait::async_trait;
use smsgate::{SmsError, SmsGateService};
use sqlx::PgPool;

use crate::common::OperationLog;
use crate::domains::auth::JwtService;
use crate::kernel::traits::BaseSmsSender;

// =============================================================================
// SmsGateService Adapter (implements BaseSmsSender trait)
// =============================================================================

/// Wrapper around SmsGateService that implements the BaseSmsSender trait
pub struct SmsGateAdapter(pub Arc<SmsGateService>);

impl SmsGateAdapter {
    pub fn new(service: Arc<SmsGateService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseSmsSender for SmsGateAdapter {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, SmsError> {
        self.0.send_code(phone, code).await
    }
}

// =============================================================================
// ServiceDeps
// =============================================================================

/// Dependencies accessible to every credential operation
#[derive(Clone)]
pub struct ServiceDeps {
    pub db_pool: PgPool,
    pub sms: Arc<dyn BaseSmsSender>,
    /// JWT service for access token creation and verification
    pub jwt_service: Arc<JwtService>,
    /// Best-effort audit sink; failures never fail the primary call
    pub oplog: OperationLog,
}

impl ServiceDeps {
    pub fn new(
        db_pool: PgPool,
        sms: Arc<dyn BaseSmsSender>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        let oplog = OperationLog::new(db_pool.clone());
        Self {
            db_pool,
            sms,
            jwt_service,
            oplog,
        }
    }
}
