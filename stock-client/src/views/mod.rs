//! View orchestrators
//!
//! Each view issues its fetches concurrently, joins them, runs the
//! aggregation engine and stores a snapshot. Snapshots live in a
//! [`ViewSlot`], which discards results of superseded refreshes: a late
//! answer to an older request never overwrites a newer one.

mod dashboard;
mod products;
mod reports;
mod suppliers;
mod transactions;
mod users;

pub use dashboard::{DashboardSnapshot, DashboardView};
pub use products::{ProductsSnapshot, ProductsView};
pub use reports::{ReportsView, StockSection, SummarySection};
pub use suppliers::SuppliersView;
pub use transactions::{NewTransaction, TransactionsSnapshot, TransactionsView};
pub use users::UsersView;

use parking_lot::Mutex;

use crate::ClientResult;

/// What happened to a finished refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer refresh was issued meanwhile; this result was dropped
    Superseded,
}

#[derive(Debug)]
struct SlotState<T> {
    latest: u64,
    value: Option<T>,
}

/// Latest-wins holder for one view snapshot
#[derive(Debug)]
pub struct ViewSlot<T> {
    state: Mutex<SlotState<T>>,
}

impl<T: Clone> ViewSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                latest: 0,
                value: None,
            }),
        }
    }

    /// Issue the next sequence number
    pub fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        state.latest += 1;
        state.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.state.lock().latest == seq
    }

    /// Store `value` if `seq` is still the latest issued
    pub fn apply(&self, seq: u64, value: T) -> Outcome {
        let mut state = self.state.lock();
        if state.latest != seq {
            return Outcome::Superseded;
        }
        state.value = Some(value);
        Outcome::Applied
    }

    pub fn snapshot(&self) -> Option<T> {
        self.state.lock().value.clone()
    }
}

impl<T: Clone> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a finished fetch to its slot.
///
/// Errors of a superseded refresh are dropped as well; the view state is
/// unchanged on any error.
pub(crate) fn settle<T: Clone>(
    slot: &ViewSlot<T>,
    seq: u64,
    view: &'static str,
    result: ClientResult<T>,
) -> ClientResult<Outcome> {
    match result {
        Ok(value) => {
            let outcome = slot.apply(seq, value);
            if outcome == Outcome::Superseded {
                tracing::debug!(view, seq, "Discarding superseded result");
            }
            Ok(outcome)
        }
        Err(e) if !slot.is_current(seq) => {
            tracing::debug!(view, seq, error = %e, "Discarding superseded failure");
            Ok(Outcome::Superseded)
        }
        Err(e) => Err(e),
    }
}

/// Report a reload issued after a committed write.
///
/// The write already happened, so a failed reload only leaves the previous
/// snapshot in place and never turns the write into an error.
pub(crate) fn reload_after_write(view: &'static str, reload: ClientResult<Outcome>) {
    if let Err(e) = reload {
        tracing::warn!(view, error = %e, "Reload after write failed, snapshot is stale");
    }
}
