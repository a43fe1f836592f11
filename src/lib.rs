pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::SplitBillError;
pub use crate::core::services::SplitBillService;
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
