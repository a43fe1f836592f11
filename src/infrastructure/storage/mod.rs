use crate::core::errors::SplitBillError;
use crate::core::models::{Address, Amount, Bill, BillAudit, BillDraft, BillIndex};
use async_trait::async_trait;

/// Durable home of the ledger.
///
/// Implementations serialize writes per bill: two `record_payment` calls on
/// the same bill never interleave, and `get_bill` never observes half of one.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Appends the bill and assigns the next index.
    async fn append_bill(&self, draft: BillDraft) -> Result<Bill, SplitBillError>;
    async fn get_bill(&self, bill_index: BillIndex) -> Result<Option<Bill>, SplitBillError>;
    async fn bill_count(&self) -> Result<u64, SplitBillError>;
    /// Applies a payment atomically and returns the updated bill.
    async fn record_payment(
        &self,
        bill_index: BillIndex,
        payer: &Address,
        amount_sent: Amount,
    ) -> Result<Bill, SplitBillError>;
    async fn save_bill_audit(&self, audit: BillAudit) -> Result<(), SplitBillError>;
    async fn get_bill_audits(&self, bill_index: BillIndex) -> Result<Vec<BillAudit>, SplitBillError>;
}

pub mod in_memory;
