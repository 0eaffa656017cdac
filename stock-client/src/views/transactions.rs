//! Transactions view
//!
//! Loads transactions for a date range (or all of them) and applies the
//! IN/OUT filter locally, so switching the filter never re-fetches.

use std::sync::Arc;

use shared::Decimal;
use shared::analytics::{TransactionField, filter_by_text_query, filter_by_type};
use shared::models::{Transaction, TransactionCreate, TransactionType, TransactionUpdate};
use shared::types::{DateRange, TypeFilter};
use validator::Validate;

use super::{Outcome, ViewSlot, reload_after_write, settle};
use crate::api::Api;
use crate::session::{Action, SessionStore, View};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsSnapshot {
    /// `None` when all transactions were loaded
    pub range: Option<DateRange>,
    pub transactions: Vec<Transaction>,
}

impl TransactionsSnapshot {
    pub fn filtered(&self, filter: TypeFilter) -> Vec<Transaction> {
        filter_by_type(&self.transactions, filter)
    }

    /// Product name, username, reference number or notes
    pub fn search(&self, query: &str) -> Vec<Transaction> {
        filter_by_text_query(&self.transactions, query, &TransactionField::LIST)
    }
}

/// Stock movement to record; the user is taken from the session
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub product_id: i64,
    pub kind: TransactionType,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub supplier_id: Option<i64>,
    pub notes: Option<String>,
    pub reference_number: Option<String>,
}

#[derive(Debug)]
pub struct TransactionsView {
    api: Api,
    session: Arc<SessionStore>,
    slot: ViewSlot<TransactionsSnapshot>,
}

impl TransactionsView {
    pub fn new(api: Api, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            slot: ViewSlot::new(),
        }
    }

    pub fn snapshot(&self) -> Option<TransactionsSnapshot> {
        self.slot.snapshot()
    }

    /// Load all transactions, or only those within `range`
    pub async fn refresh(&self, range: Option<DateRange>) -> ClientResult<Outcome> {
        self.session.require_view(View::Transactions)?;
        let seq = self.slot.begin();

        let result = match range {
            Some(range) => self.api.transactions.by_date_range(range).await,
            None => self.api.transactions.all().await,
        }
        .map(|transactions| TransactionsSnapshot {
            range,
            transactions,
        });
        settle(&self.slot, seq, "transactions", result)
    }

    /// Open to every signed-in user
    pub async fn record(&self, draft: NewTransaction) -> ClientResult<Transaction> {
        self.session.require(Action::RecordTransaction)?;
        let identity = self.session.identity().ok_or(ClientError::NotAuthenticated)?;

        let payload = TransactionCreate {
            product_id: draft.product_id,
            kind: draft.kind,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            supplier_id: draft.supplier_id,
            user_id: identity.user_id,
            notes: draft.notes,
            reference_number: draft.reference_number,
        };
        payload.validate()?;

        let tx = self.api.transactions.create(&payload).await?;
        tracing::info!(
            transaction_id = tx.id,
            product_id = tx.product_id,
            kind = %tx.kind,
            quantity = tx.quantity,
            "Transaction recorded"
        );
        reload_after_write("transactions", self.reload().await);
        Ok(tx)
    }

    pub async fn update(&self, id: i64, payload: &TransactionUpdate) -> ClientResult<Transaction> {
        self.session.require(Action::EditTransactions)?;
        payload.validate()?;

        let tx = self.api.transactions.update(id, payload).await?;
        reload_after_write("transactions", self.reload().await);
        Ok(tx)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.session.require(Action::EditTransactions)?;

        self.api.transactions.delete(id).await?;
        tracing::info!(transaction_id = id, "Transaction deleted");
        reload_after_write("transactions", self.reload().await);
        Ok(())
    }

    /// Refresh with the range of the current snapshot
    async fn reload(&self) -> ClientResult<Outcome> {
        let range = self.snapshot().and_then(|s| s.range);
        self.refresh(range).await
    }
}
