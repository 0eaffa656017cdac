//! Dashboard counters

use serde::{Deserialize, Serialize};

use crate::models::{Product, Supplier, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_suppliers: usize,
    pub low_stock_count: usize,
    pub recent_transaction_count: usize,
}

/// Plain cardinalities of already-fetched lists.
///
/// `recent_transactions` must already be limited to the trailing window by
/// the caller.
pub fn compute_dashboard_stats(
    products: &[Product],
    suppliers: &[Supplier],
    low_stock_products: &[Product],
    recent_transactions: &[Transaction],
) -> DashboardStats {
    DashboardStats {
        total_products: products.len(),
        total_suppliers: suppliers.len(),
        low_stock_count: low_stock_products.len(),
        recent_transaction_count: recent_transactions.len(),
    }
}
