use super::{TEST_POT, addr, amounts, names};
use crate::core::errors::SplitBillError;
use crate::core::models::{Amount, AppLog, BillStatus, LedgerEvent};
use crate::core::services::SplitBillService;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use async_trait::async_trait;

/// Audit sink that is always down.
struct UnavailableLogging;

#[async_trait]
impl LoggingService for UnavailableLogging {
    async fn log_action(
        &self,
        _action: &str,
        _details: serde_json::Value,
        _actor: Option<&str>,
    ) -> Result<(), SplitBillError> {
        Err(SplitBillError::LoggingError("audit sink unavailable".to_string()))
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, SplitBillError> {
        Err(SplitBillError::LoggingError("audit sink unavailable".to_string()))
    }
}

fn create_unaudited_service() -> SplitBillService<UnavailableLogging, InMemoryStorage> {
    SplitBillService::new(InMemoryStorage::new(), UnavailableLogging, addr(TEST_POT))
}

#[tokio::test]
async fn test_committed_changes_survive_audit_failure() {
    let service = create_unaudited_service();
    let mut events = service.subscribe();

    let index = service
        .create_bill(names(&["Alice", "Bob"]), vec![addr("0xA"), addr("0xB")], amounts(&[80, 20]))
        .await
        .unwrap();
    assert!(matches!(events.recv().await.unwrap(), LedgerEvent::BillCreated { .. }));

    service.pay_share(index, &addr("0xB"), Amount::new(20)).await.unwrap();
    assert!(matches!(
        events.recv().await.unwrap(),
        LedgerEvent::PaymentRecorded { fully_settled: true, .. }
    ));
    assert_eq!(service.get_bill(index).await.unwrap().status(), BillStatus::FullySettled);

    // The caller saw success, so a retry is a genuine double payment.
    let retry = service.pay_share(index, &addr("0xB"), Amount::new(20)).await;
    assert!(matches!(retry, Err(SplitBillError::AlreadyPaid(_))));
}
