//! Dashboard view

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use shared::analytics::{DashboardStats, compute_dashboard_stats};
use shared::models::{Product, StockReportRow, Supplier, Transaction};
use shared::types::DateRange;

use super::{Outcome, ViewSlot, settle};
use crate::ClientResult;
use crate::api::Api;
use crate::session::{SessionStore, View};

/// Trailing window for "recent" transactions, in days
pub const RECENT_WINDOW_DAYS: i64 = 7;
const RECENT_PREVIEW: usize = 5;
const LOW_STOCK_PREVIEW: usize = 5;
const STOCK_PREVIEW: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub window: DateRange,
    pub recent_transactions: Vec<Transaction>,
    pub low_stock_products: Vec<Product>,
    pub stock_overview: Vec<StockReportRow>,
}

#[derive(Debug)]
pub struct DashboardView {
    api: Api,
    session: Arc<SessionStore>,
    slot: ViewSlot<DashboardSnapshot>,
}

impl DashboardView {
    pub fn new(api: Api, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            slot: ViewSlot::new(),
        }
    }

    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.slot.snapshot()
    }

    pub async fn refresh(&self) -> ClientResult<Outcome> {
        self.refresh_at(Local::now().date_naive()).await
    }

    /// Refresh with the trailing window ending at `today`. All five fetches
    /// are required.
    pub async fn refresh_at(&self, today: NaiveDate) -> ClientResult<Outcome> {
        self.session.require_view(View::Dashboard)?;
        let seq = self.slot.begin();
        let window = DateRange::trailing_days(today, RECENT_WINDOW_DAYS);

        let (products, suppliers, low_stock, recent, stock) = tokio::join!(
            self.api.products.active(),
            self.api.suppliers.active(),
            self.api.products.low_stock(),
            self.api.transactions.by_date_range(window),
            self.api.reports.stock(),
        );

        let result = assemble(window, products, suppliers, low_stock, recent, stock);
        let stats = result.as_ref().ok().map(|snapshot| snapshot.stats);

        let outcome = settle(&self.slot, seq, "dashboard", result)?;
        if let (Outcome::Applied, Some(stats)) = (outcome, stats) {
            tracing::info!(
                products = stats.total_products,
                low_stock = stats.low_stock_count,
                recent = stats.recent_transaction_count,
                "Dashboard refreshed"
            );
        }
        Ok(outcome)
    }
}

fn assemble(
    window: DateRange,
    products: ClientResult<Vec<Product>>,
    suppliers: ClientResult<Vec<Supplier>>,
    low_stock: ClientResult<Vec<Product>>,
    recent: ClientResult<Vec<Transaction>>,
    stock: ClientResult<Vec<StockReportRow>>,
) -> ClientResult<DashboardSnapshot> {
    let (products, suppliers, low_stock, recent, stock) =
        (products?, suppliers?, low_stock?, recent?, stock?);

    Ok(DashboardSnapshot {
        stats: compute_dashboard_stats(&products, &suppliers, &low_stock, &recent),
        window,
        recent_transactions: recent.into_iter().take(RECENT_PREVIEW).collect(),
        low_stock_products: low_stock.into_iter().take(LOW_STOCK_PREVIEW).collect(),
        stock_overview: stock.into_iter().take(STOCK_PREVIEW).collect(),
    })
}
