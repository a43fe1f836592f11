use crate::core::errors::SplitBillError;
use crate::core::models::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        actor: Option<&str>,
    ) -> Result<(), SplitBillError> {
        if !details.is_object() {
            return Err(SplitBillError::LoggingError(format!(
                "details for {} must be a JSON object",
                action
            )));
        }
        let mut logs = self.logs.write().await;
        logs.push(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            actor: actor.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, SplitBillError> {
        let logs = self.logs.read().await;
        Ok(logs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn keeps_entries_in_order() {
        let logging = InMemoryLogging::new();
        logging.log_action("FIRST", json!({ "n": 1 }), None).await.unwrap();
        logging
            .log_action("SECOND", json!({ "n": 2 }), Some("0xA"))
            .await
            .unwrap();

        let logs = logging.get_logs().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "FIRST");
        assert_eq!(logs[1].actor.as_deref(), Some("0xA"));
    }

    #[tokio::test]
    async fn rejects_non_object_details() {
        let logging = InMemoryLogging::new();
        let result = logging.log_action("BAD", json!([1, 2]), None).await;
        assert!(matches!(result, Err(SplitBillError::LoggingError(_))));
    }
}
