//! Suppliers view

use std::sync::Arc;

use shared::analytics::{SupplierField, filter_by_text_query};
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};
use validator::Validate;

use super::{Outcome, ViewSlot, reload_after_write, settle};
use crate::ClientResult;
use crate::api::Api;
use crate::session::{Action, SessionStore, View};

#[derive(Debug)]
pub struct SuppliersView {
    api: Api,
    session: Arc<SessionStore>,
    slot: ViewSlot<Vec<Supplier>>,
}

impl SuppliersView {
    pub fn new(api: Api, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            slot: ViewSlot::new(),
        }
    }

    pub fn snapshot(&self) -> Option<Vec<Supplier>> {
        self.slot.snapshot()
    }

    /// Matches name, contact person, email or phone
    pub fn search(&self, query: &str) -> Vec<Supplier> {
        self.snapshot()
            .map(|suppliers| filter_by_text_query(&suppliers, query, &SupplierField::LIST))
            .unwrap_or_default()
    }

    pub async fn refresh(&self) -> ClientResult<Outcome> {
        self.session.require_view(View::Suppliers)?;
        let seq = self.slot.begin();
        let result = self.api.suppliers.active().await;
        settle(&self.slot, seq, "suppliers", result)
    }

    pub async fn create(&self, payload: &SupplierCreate) -> ClientResult<Supplier> {
        self.session.require(Action::ManageSuppliers)?;
        payload.validate()?;

        let supplier = self.api.suppliers.create(payload).await?;
        tracing::info!(supplier_id = supplier.id, name = %supplier.name, "Supplier created");
        reload_after_write("suppliers", self.refresh().await);
        Ok(supplier)
    }

    pub async fn update(&self, id: i64, payload: &SupplierUpdate) -> ClientResult<Supplier> {
        self.session.require(Action::ManageSuppliers)?;
        payload.validate()?;

        let supplier = self.api.suppliers.update(id, payload).await?;
        reload_after_write("suppliers", self.refresh().await);
        Ok(supplier)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.session.require(Action::ManageSuppliers)?;

        self.api.suppliers.delete(id).await?;
        tracing::info!(supplier_id = id, "Supplier deleted");
        reload_after_write("suppliers", self.refresh().await);
        Ok(())
    }
}
