//! Derived-view aggregation engine
//!
//! Pure functions turning fetched entity lists into dashboard counters, stock
//! report slices, category distributions and transaction trends. Nothing here
//! performs I/O or fails: empty input yields empty or zeroed output, and
//! disagreements with upstream-supplied values come back as [`Anomaly`]
//! values next to the result instead of errors.

mod dashboard;
mod filter;
mod stock;
mod trend;

#[cfg(test)]
pub(crate) mod tests_support;

pub use dashboard::*;
pub use filter::*;
pub use stock::*;
pub use trend::*;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Low-stock rule shared by products and stock report rows.
///
/// Non-strict: `minimum == 0` alerts only once stock is depleted, and
/// negative stock always counts as low.
#[inline]
pub fn is_low_stock(stock: i32, minimum: i32) -> bool {
    stock <= minimum
}

/// Data-integrity disagreement between upstream values and local checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anomaly {
    /// Upstream `lowStock` flag disagrees with `currentStock <= minimumStock`
    #[serde(rename_all = "camelCase")]
    LowStockFlagMismatch {
        product_id: i64,
        product_name: String,
        current_stock: i32,
        minimum_stock: i32,
        reported: bool,
    },
    /// Upstream `netValue` differs from `totalInValue - totalOutValue`
    #[serde(rename_all = "camelCase")]
    NetValueMismatch {
        date: NaiveDate,
        expected: Decimal,
        reported: Decimal,
    },
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowStockFlagMismatch {
                product_id,
                product_name,
                current_stock,
                minimum_stock,
                reported,
            } => write!(
                f,
                "product {product_id} ({product_name}): lowStock={reported} but stock {current_stock} vs minimum {minimum_stock}"
            ),
            Self::NetValueMismatch {
                date,
                expected,
                reported,
            } => write!(
                f,
                "summary {date}: netValue {reported} != in - out ({expected})"
            ),
        }
    }
}
