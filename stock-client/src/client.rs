//! StockClient - wiring of transport, session store, fetchers and views

use std::sync::Arc;

use shared::models::Identity;

use crate::api::Api;
use crate::http::{HttpClient, NetworkTransport, Transport};
use crate::session::{SessionStore, TokenStorage};
use crate::views::{
    DashboardView, ProductsView, ReportsView, SuppliersView, TransactionsView, UsersView,
};
use crate::{ClientConfig, ClientResult};

/// One client per process; cheap to clone
#[derive(Debug, Clone)]
pub struct StockClient {
    config: ClientConfig,
    session: Arc<SessionStore>,
    api: Api,
}

impl StockClient {
    /// Client over the network transport described by `config`
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let transport = NetworkTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Client over any transport, e.g. [`crate::OneshotTransport`]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let session = Arc::new(SessionStore::new(TokenStorage::new(&config.data_dir)));
        let http = HttpClient::new(transport, session.clone(), config.invalidate_on_forbidden);
        Self {
            config,
            session,
            api: Api::new(http),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Identity> {
        self.session.login(&self.api.auth, username, password).await
    }

    pub async fn restore(&self) -> Option<Identity> {
        self.session.restore(&self.api.auth).await
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::new(self.api.clone(), self.session.clone())
    }

    pub fn reports(&self) -> ReportsView {
        ReportsView::new(self.api.clone(), self.session.clone())
    }

    pub fn products(&self) -> ProductsView {
        ProductsView::new(self.api.clone(), self.session.clone())
    }

    pub fn suppliers(&self) -> SuppliersView {
        SuppliersView::new(self.api.clone(), self.session.clone())
    }

    pub fn transactions(&self) -> TransactionsView {
        TransactionsView::new(self.api.clone(), self.session.clone())
    }

    pub fn users(&self) -> UsersView {
        UsersView::new(self.api.clone(), self.session.clone())
    }
}
