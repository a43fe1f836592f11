pub const MIN_PARTICIPANTS: usize = 2;
pub const MAX_PARTICIPANTS: usize = 256;
pub const MAX_NAME_LENGTH: usize = 100;

/// Capacity of the ledger event feed; slow subscribers see `Lagged`.
pub const EVENT_FEED_CAPACITY: usize = 1024;

// Audit actions
pub const BILL_CREATED: &str = "BILL_CREATED";
pub const PAYMENT_RECORDED: &str = "PAYMENT_RECORDED";
pub const PAYMENT_REJECTED: &str = "PAYMENT_REJECTED";
pub const BILL_SETTLED: &str = "BILL_SETTLED";
pub const SETTLEMENTS_CALCULATED: &str = "SETTLEMENTS_CALCULATED";
