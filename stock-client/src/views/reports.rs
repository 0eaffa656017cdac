//! Reports view
//!
//! Two independently sequenced sections: the stock report and the
//! transaction summary for a date range. Changing the range re-fetches only
//! the summary.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use shared::analytics::{
    Anomaly, CategoryAggregate, StockReportTotals, SummaryTotals, TrendPoint,
    category_distribution, low_stock_anomalies, low_stock_slice, stock_report_totals,
    summarize_transactions, top_n_by_stock_value, transaction_trend,
};
use shared::models::{StockReportRow, TransactionSummaryRow};
use shared::types::DateRange;

use super::{Outcome, ViewSlot, settle};
use crate::ClientResult;
use crate::api::Api;
use crate::session::{SessionStore, View};

pub const DEFAULT_RANGE_DAYS: i64 = 30;
pub const TOP_PRODUCTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct StockSection {
    pub totals: StockReportTotals,
    pub top_products: Vec<StockReportRow>,
    pub low_stock: Vec<StockReportRow>,
    pub categories: Vec<CategoryAggregate>,
    pub anomalies: Vec<Anomaly>,
}

impl StockSection {
    pub fn from_rows(rows: &[StockReportRow]) -> Self {
        Self {
            totals: stock_report_totals(rows),
            top_products: top_n_by_stock_value(rows, TOP_PRODUCTS),
            low_stock: low_stock_slice(rows),
            categories: category_distribution(rows),
            anomalies: low_stock_anomalies(rows),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummarySection {
    pub range: DateRange,
    pub trend: Vec<TrendPoint>,
    pub totals: SummaryTotals,
    pub anomalies: Vec<Anomaly>,
}

impl SummarySection {
    pub fn from_rows(range: DateRange, rows: &[TransactionSummaryRow]) -> Self {
        let trend = transaction_trend(rows);
        let (totals, _) = summarize_transactions(rows);
        Self {
            range,
            trend: trend.points,
            totals,
            anomalies: trend.anomalies,
        }
    }
}

#[derive(Debug)]
pub struct ReportsView {
    api: Api,
    session: Arc<SessionStore>,
    stock: ViewSlot<StockSection>,
    summary: ViewSlot<SummarySection>,
}

impl ReportsView {
    pub fn new(api: Api, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            stock: ViewSlot::new(),
            summary: ViewSlot::new(),
        }
    }

    /// Last 30 days ending at `today`
    pub fn default_range(today: NaiveDate) -> DateRange {
        DateRange::trailing_days(today, DEFAULT_RANGE_DAYS)
    }

    pub fn stock(&self) -> Option<StockSection> {
        self.stock.snapshot()
    }

    pub fn summary(&self) -> Option<SummarySection> {
        self.summary.snapshot()
    }

    /// Refresh both sections for the default range
    pub async fn refresh(&self) -> ClientResult<Outcome> {
        let range = Self::default_range(Local::now().date_naive());
        self.refresh_with(range).await
    }

    /// Refresh both sections. Both fetches are required; on any failure
    /// neither section changes.
    ///
    /// `Superseded` means at least one section was dropped in favour of a
    /// newer request. The other may still have been applied, e.g. the stock
    /// section when a concurrent [`Self::set_range`] replaced the summary.
    pub async fn refresh_with(&self, range: DateRange) -> ClientResult<Outcome> {
        self.session.require_view(View::Reports)?;
        let stock_seq = self.stock.begin();
        let summary_seq = self.summary.begin();

        let (rows, summary_rows) =
            tokio::join!(self.api.reports.stock(), self.api.reports.summary(range));

        let (rows, summary_rows) = match (rows, summary_rows) {
            (Ok(rows), Ok(summary_rows)) => (rows, summary_rows),
            (Err(e), _) | (_, Err(e)) => return settle(&self.stock, stock_seq, "reports", Err(e)),
        };

        let stock = StockSection::from_rows(&rows);
        let summary = SummarySection::from_rows(range, &summary_rows);
        log_anomalies(&stock.anomalies);
        log_anomalies(&summary.anomalies);

        let stock_outcome = self.stock.apply(stock_seq, stock);
        let summary_outcome = self.summary.apply(summary_seq, summary);
        if stock_outcome == Outcome::Applied && summary_outcome == Outcome::Applied {
            tracing::info!(
                products = rows.len(),
                summary_rows = summary_rows.len(),
                start = %range.start,
                end = %range.end,
                "Reports refreshed"
            );
            Ok(Outcome::Applied)
        } else {
            tracing::debug!(
                stock = ?stock_outcome,
                summary = ?summary_outcome,
                "Reports refresh partly superseded"
            );
            Ok(Outcome::Superseded)
        }
    }

    /// Re-fetch only the transaction summary for a new range
    pub async fn set_range(&self, range: DateRange) -> ClientResult<Outcome> {
        self.session.require_view(View::Reports)?;
        let seq = self.summary.begin();

        let result = self.api.reports.summary(range).await.map(|rows| {
            let section = SummarySection::from_rows(range, &rows);
            log_anomalies(&section.anomalies);
            section
        });
        settle(&self.summary, seq, "reports.summary", result)
    }
}

fn log_anomalies(anomalies: &[Anomaly]) {
    for anomaly in anomalies {
        tracing::warn!(%anomaly, "Report data anomaly");
    }
}
