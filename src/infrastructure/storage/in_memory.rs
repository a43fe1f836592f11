use crate::core::errors::SplitBillError;
use crate::core::models::{Address, Amount, Bill, BillAudit, BillDraft, BillIndex};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type BillSlot = Arc<RwLock<Bill>>;

/// Ledger kept in process memory.
///
/// The outer lock only guards the list of slots; each bill has its own lock,
/// so payments on unrelated bills never wait on each other.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    bills: Arc<RwLock<Vec<BillSlot>>>,
    bill_audits: Arc<RwLock<HashMap<BillIndex, Vec<BillAudit>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            bills: Arc::new(RwLock::new(Vec::new())),
            bill_audits: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn slot(&self, bill_index: BillIndex) -> Option<BillSlot> {
        let bills = self.bills.read().await;
        usize::try_from(bill_index)
            .ok()
            .and_then(|i| bills.get(i))
            .cloned()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn append_bill(&self, draft: BillDraft) -> Result<Bill, SplitBillError> {
        let mut bills = self.bills.write().await;
        let index = BillIndex::try_from(bills.len())
            .map_err(|e| SplitBillError::StorageError(format!("ledger index overflow: {}", e)))?;
        let bill = draft.into_bill(index, Utc::now());
        bills.push(Arc::new(RwLock::new(bill.clone())));
        Ok(bill)
    }

    async fn get_bill(&self, bill_index: BillIndex) -> Result<Option<Bill>, SplitBillError> {
        match self.slot(bill_index).await {
            Some(slot) => Ok(Some(slot.read().await.clone())),
            None => Ok(None),
        }
    }

    async fn bill_count(&self) -> Result<u64, SplitBillError> {
        let bills = self.bills.read().await;
        Ok(bills.len() as u64)
    }

    async fn record_payment(
        &self,
        bill_index: BillIndex,
        payer: &Address,
        amount_sent: Amount,
    ) -> Result<Bill, SplitBillError> {
        let slot = self
            .slot(bill_index)
            .await
            .ok_or(SplitBillError::BillNotFound(bill_index))?;
        let mut bill = slot.write().await;
        bill.record_payment(payer, amount_sent)?;
        Ok(bill.clone())
    }

    async fn save_bill_audit(&self, audit: BillAudit) -> Result<(), SplitBillError> {
        let mut bill_audits = self.bill_audits.write().await;
        bill_audits
            .entry(audit.bill_index)
            .or_insert_with(Vec::new)
            .push(audit);
        Ok(())
    }

    async fn get_bill_audits(&self, bill_index: BillIndex) -> Result<Vec<BillAudit>, SplitBillError> {
        let bill_audits = self.bill_audits.read().await;
        Ok(bill_audits.get(&bill_index).cloned().unwrap_or_default())
    }
}
