//! Report endpoints
//!
//! Rows arrive pre-aggregated; see `shared::analytics` for what is derived
//! from them locally.

use shared::models::{StockReportRow, TransactionSummaryRow};
use shared::types::DateRange;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ReportsApi {
    http: HttpClient,
}

impl ReportsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /reports/stock`
    pub async fn stock(&self) -> ClientResult<Vec<StockReportRow>> {
        self.http.get("/reports/stock").await
    }

    /// `GET /reports/summary?startDate=&endDate=`
    pub async fn summary(&self, range: DateRange) -> ClientResult<Vec<TransactionSummaryRow>> {
        self.http
            .get(&format!("/reports/summary?{}", range.to_query()))
            .await
    }
}
