//! Products view

use std::sync::Arc;

use shared::analytics::{ProductField, filter_by_text_query};
use shared::models::{Product, ProductCreate, ProductUpdate, Supplier};
use validator::Validate;

use super::{Outcome, ViewSlot, reload_after_write, settle};
use crate::ClientResult;
use crate::api::Api;
use crate::session::{Action, SessionStore, View};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsSnapshot {
    pub products: Vec<Product>,
    /// Choices for the supplier picker; empty if they could not be loaded
    pub suppliers: Vec<Supplier>,
}

impl ProductsSnapshot {
    /// Name, category or SKU contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<Product> {
        filter_by_text_query(&self.products, query, &ProductField::LIST)
    }

    pub fn low_stock(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect()
    }
}

#[derive(Debug)]
pub struct ProductsView {
    api: Api,
    session: Arc<SessionStore>,
    slot: ViewSlot<ProductsSnapshot>,
}

impl ProductsView {
    pub fn new(api: Api, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            slot: ViewSlot::new(),
        }
    }

    pub fn snapshot(&self) -> Option<ProductsSnapshot> {
        self.slot.snapshot()
    }

    /// Products are required; the supplier list degrades to empty.
    pub async fn refresh(&self) -> ClientResult<Outcome> {
        self.session.require_view(View::Products)?;
        let seq = self.slot.begin();

        let (products, suppliers) =
            tokio::join!(self.api.products.active(), self.api.suppliers.active());

        let suppliers = suppliers.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Supplier list unavailable, continuing without it");
            Vec::new()
        });
        let result = products.map(|products| ProductsSnapshot {
            products,
            suppliers,
        });
        settle(&self.slot, seq, "products", result)
    }

    pub async fn create(&self, payload: &ProductCreate) -> ClientResult<Product> {
        self.session.require(Action::ManageProducts)?;
        payload.validate()?;

        let product = self.api.products.create(payload).await?;
        tracing::info!(product_id = product.id, name = %product.name, "Product created");
        reload_after_write("products", self.refresh().await);
        Ok(product)
    }

    pub async fn update(&self, id: i64, payload: &ProductUpdate) -> ClientResult<Product> {
        self.session.require(Action::ManageProducts)?;
        payload.validate()?;

        let product = self.api.products.update(id, payload).await?;
        tracing::info!(product_id = id, "Product updated");
        reload_after_write("products", self.refresh().await);
        Ok(product)
    }

    pub async fn update_stock(&self, id: i64, stock: i32) -> ClientResult<()> {
        self.session.require(Action::ManageProducts)?;
        if stock < 0 {
            return Err(crate::ClientError::Validation(
                "stock cannot be negative".into(),
            ));
        }

        self.api.products.update_stock(id, stock).await?;
        tracing::info!(product_id = id, stock, "Stock level set");
        reload_after_write("products", self.refresh().await);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.session.require(Action::ManageProducts)?;

        self.api.products.delete(id).await?;
        tracing::info!(product_id = id, "Product deleted");
        reload_after_write("products", self.refresh().await);
        Ok(())
    }
}
