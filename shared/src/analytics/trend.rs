//! Transaction trend and summary combination
//!
//! Summary rows are passed through untouched. Each row's `net_value` is
//! checked against `total_in_value - total_out_value`; a disagreement is
//! reported as [`Anomaly::NetValueMismatch`] while the upstream value is
//! still the one used.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Anomaly;
use crate::models::TransactionSummaryRow;

/// Chart-ready projection of one summary row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub in_value: Decimal,
    pub out_value: Decimal,
    pub net_value: Decimal,
}

impl From<&TransactionSummaryRow> for TrendPoint {
    fn from(row: &TransactionSummaryRow) -> Self {
        Self {
            date: row.date,
            in_value: row.total_in_value,
            out_value: row.total_out_value,
            net_value: row.net_value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTrend {
    pub points: Vec<TrendPoint>,
    pub anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_transactions: i64,
    pub total_in_value: Decimal,
    pub total_out_value: Decimal,
    /// Inbound plus outbound value
    pub total_value: Decimal,
    /// Sum of upstream `net_value`s
    pub net_value: Decimal,
}

fn net_value_anomaly(row: &TransactionSummaryRow) -> Option<Anomaly> {
    let expected = row.total_in_value - row.total_out_value;
    (expected != row.net_value).then(|| Anomaly::NetValueMismatch {
        date: row.date,
        expected,
        reported: row.net_value,
    })
}

pub fn net_value_anomalies(rows: &[TransactionSummaryRow]) -> Vec<Anomaly> {
    rows.iter().filter_map(net_value_anomaly).collect()
}

/// One point per row, in input order.
pub fn transaction_trend(rows: &[TransactionSummaryRow]) -> TransactionTrend {
    TransactionTrend {
        points: rows.iter().map(TrendPoint::from).collect(),
        anomalies: net_value_anomalies(rows),
    }
}

/// Combine several summary rows into period totals.
pub fn summarize_transactions(rows: &[TransactionSummaryRow]) -> (SummaryTotals, Vec<Anomaly>) {
    let totals = rows.iter().fold(SummaryTotals::default(), |mut acc, row| {
        acc.total_transactions += row.total_transactions;
        acc.total_in_value += row.total_in_value;
        acc.total_out_value += row.total_out_value;
        acc.net_value += row.net_value;
        acc
    });

    (
        SummaryTotals {
            total_value: totals.total_in_value + totals.total_out_value,
            ..totals
        },
        net_value_anomalies(rows),
    )
}
