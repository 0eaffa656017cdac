//! Report rows
//!
//! Pre-aggregated rows produced by the inventory service. `stock_value`,
//! `low_stock` and `net_value` are authoritative and never recomputed here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of `GET /reports/stock`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReportRow {
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    pub current_stock: i32,
    pub minimum_stock: i32,
    #[serde(default)]
    pub price_in: Option<Decimal>,
    #[serde(default)]
    pub price_out: Option<Decimal>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub stock_value: Decimal,
    pub low_stock: bool,
}

/// One row of `GET /reports/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummaryRow {
    pub date: NaiveDate,
    #[serde(default)]
    pub period: Option<String>,
    pub total_transactions: i64,
    pub in_transactions: i64,
    pub out_transactions: i64,
    pub total_in_value: Decimal,
    pub total_out_value: Decimal,
    pub net_value: Decimal,
}
