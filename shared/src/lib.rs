//! Shared types for the stock client
//!
//! Wire models exchanged with the inventory service and the pure
//! aggregation engine that turns them into report views.

pub mod analytics;
pub mod client;
pub mod models;
pub mod types;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use models::*;
pub use types::{DateRange, TypeFilter};
