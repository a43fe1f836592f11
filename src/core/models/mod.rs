pub mod address;
pub mod amount;
pub mod audit;
pub mod bill;
pub mod event;
pub mod settlement;

pub use address::Address;
pub use amount::Amount;
pub use audit::{AppLog, BillAudit};
pub use bill::{Bill, BillDraft, BillIndex, BillStatus, Creditor, Share};
pub use event::LedgerEvent;
pub use settlement::{SettlementLine, Transfer};
