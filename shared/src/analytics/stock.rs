//! Stock report slices
//!
//! `stock_value` and `low_stock` on a [`StockReportRow`] are authoritative;
//! the functions here only rank, group and cross-check them.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Anomaly, is_low_stock};
use crate::models::StockReportRow;

/// Bucket for rows without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAggregate {
    pub category: String,
    pub total_value: Decimal,
    pub product_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReportTotals {
    pub total_stock_value: Decimal,
    pub total_products: usize,
    pub low_stock_count: usize,
}

/// The `n` most valuable rows, descending. Equal values keep input order.
pub fn top_n_by_stock_value(rows: &[StockReportRow], n: usize) -> Vec<StockReportRow> {
    let mut ranked = rows.to_vec();
    // slice::sort_by is stable
    ranked.sort_by(|a, b| b.stock_value.cmp(&a.stock_value));
    ranked.truncate(n);
    ranked
}

/// Group by category in first-seen order, summing `stock_value`.
pub fn category_distribution(rows: &[StockReportRow]) -> Vec<CategoryAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CategoryAggregate> = Vec::new();

    for row in rows {
        let key = row.category.as_deref().unwrap_or(UNCATEGORIZED);
        match index.get(key) {
            Some(&pos) => {
                let group = &mut groups[pos];
                group.total_value += row.stock_value;
                group.product_count += 1;
            }
            None => {
                index.insert(key, groups.len());
                groups.push(CategoryAggregate {
                    category: key.to_string(),
                    total_value: row.stock_value,
                    product_count: 1,
                });
            }
        }
    }

    groups
}

/// Rows flagged low-stock upstream, input order preserved.
pub fn low_stock_slice(rows: &[StockReportRow]) -> Vec<StockReportRow> {
    rows.iter().filter(|row| row.low_stock).cloned().collect()
}

/// Rows whose upstream `low_stock` flag disagrees with the `<=` rule.
pub fn low_stock_anomalies(rows: &[StockReportRow]) -> Vec<Anomaly> {
    rows.iter()
        .filter(|row| row.low_stock != is_low_stock(row.current_stock, row.minimum_stock))
        .map(|row| Anomaly::LowStockFlagMismatch {
            product_id: row.product_id,
            product_name: row.product_name.clone(),
            current_stock: row.current_stock,
            minimum_stock: row.minimum_stock,
            reported: row.low_stock,
        })
        .collect()
}

pub fn stock_report_totals(rows: &[StockReportRow]) -> StockReportTotals {
    StockReportTotals {
        total_stock_value: rows.iter().map(|row| row.stock_value).sum(),
        total_products: rows.len(),
        low_stock_count: rows.iter().filter(|row| row.low_stock).count(),
    }
}
