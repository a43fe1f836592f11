use super::address::Address;
use super::amount::Amount;
use super::bill::BillIndex;
use serde::Serialize;

/// Published on the service's event feed after each ledger mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    BillCreated {
        bill_index: BillIndex,
        participants: usize,
        total: Amount,
    },
    PaymentRecorded {
        bill_index: BillIndex,
        payer: Address,
        amount: Amount,
        fully_settled: bool,
    },
}
