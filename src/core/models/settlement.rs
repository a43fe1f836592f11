use super::address::Address;
use super::amount::Amount;
use serde::Serialize;
use utoipa::ToSchema;

/// `from` still owes `to` this amount. Derived on demand, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

/// A transfer with both parties resolved to display names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct SettlementLine {
    pub from: Address,
    pub from_name: String,
    pub to: Address,
    pub to_name: String,
    pub amount: Amount,
}
