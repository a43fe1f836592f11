use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SplitBillError {
    /// Structural problem with a new bill (participant counts).
    #[error("Invalid bill: {0}")]
    InvalidBill(String),

    /// An owed amount is zero, negative, malformed or out of range.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The same address appears twice in one bill.
    #[error("Participant {0} appears more than once in the bill")]
    DuplicateParticipant(String),

    #[error("Bill {0} not found")]
    BillNotFound(u64),

    /// No share of the bill belongs to the payer.
    #[error("Address {0} has no share in this bill")]
    UnauthorizedPayer(String),

    #[error("Share of {0} is already paid")]
    AlreadyPaid(String),

    #[error("Amount mismatch: expected {expected}, got {sent}")]
    AmountMismatch { expected: String, sent: String },

    /// Bookkeeping bug detected while netting balances.
    #[error("Settlement invariant violated: {0}")]
    SettlementInvariant(String),

    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl SplitBillError {
    pub(crate) fn invalid_input(field: &str, title: &str, description: impl Into<String>) -> Self {
        SplitBillError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.to_string(),
                description: description.into(),
            },
        )
    }
}
