//! Data models
//!
//! Wire types of the inventory service API.
//! All IDs are `i64`; JSON field names are camelCase.

pub mod product;
pub mod report;
pub mod role;
pub mod supplier;
pub mod transaction;
pub mod user;

// Re-exports
pub use product::*;
pub use report::*;
pub use role::*;
pub use supplier::*;
pub use transaction::*;
pub use user::*;
