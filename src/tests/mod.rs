mod audit_tests;
mod payment_tests;

use crate::core::models::{Address, Amount, BillIndex, Creditor};
use crate::core::services::SplitBillService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub const TEST_POT: &str = "0xPOT";

pub fn create_test_service() -> SplitBillService<InMemoryLogging, InMemoryStorage> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    SplitBillService::new(storage, logging, addr(TEST_POT))
}

pub fn addr(raw: &str) -> Address {
    Address::parse(raw).unwrap()
}

pub fn amounts(values: &[u128]) -> Vec<Amount> {
    values.iter().copied().map(Amount::new).collect()
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|n| n.to_string()).collect()
}

/// Alice fronted 100, Bob and Carol owe 50 each.
pub async fn create_dinner_bill(service: &SplitBillService<InMemoryLogging, InMemoryStorage>) -> BillIndex {
    service
        .create_bill(
            names(&["Alice", "Bob", "Carol"]),
            vec![addr("0xA"), addr("0xB"), addr("0xC")],
            amounts(&[100, 50, 50]),
        )
        .await
        .unwrap()
}

pub async fn create_pot_bill(
    service: &SplitBillService<InMemoryLogging, InMemoryStorage>,
    owed: &[u128],
) -> BillIndex {
    let participants: Vec<String> = (0..owed.len()).map(|i| format!("P{}", i)).collect();
    let addresses = (0..owed.len()).map(|i| addr(&format!("0x{:04X}", i))).collect();
    service
        .create_bill_with_creditor(participants, addresses, amounts(owed), Creditor::Pot)
        .await
        .unwrap()
}
