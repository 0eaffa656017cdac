//! Common types for the shared crate
//!
//! Query parameters used across fetchers and reports.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::TransactionType;

/// Inclusive calendar date range (`startDate` / `endDate` query parameters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `[today - days, today]`
    pub fn trailing_days(today: NaiveDate, days: i64) -> Self {
        Self {
            start: today - Duration::days(days),
            end: today,
        }
    }

    /// Query string fragment, e.g. `startDate=2024-01-01&endDate=2024-01-31`
    pub fn to_query(&self) -> String {
        format!(
            "startDate={}&endDate={}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Transaction type filter used by list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeFilter {
    #[default]
    All,
    In,
    Out,
}

impl TypeFilter {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::In => kind == TransactionType::In,
            Self::Out => kind == TransactionType::Out,
        }
    }
}

impl std::str::FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            other => Err(format!("unknown transaction filter: {other}")),
        }
    }
}
