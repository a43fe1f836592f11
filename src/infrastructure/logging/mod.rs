pub mod in_memory;

use crate::core::errors::SplitBillError;
use crate::core::models::AppLog;
use async_trait::async_trait;

/// Application-level audit log of ledger actions.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        actor: Option<&str>,
    ) -> Result<(), SplitBillError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, SplitBillError>;
}
