//! Entity fetchers
//!
//! Thin typed accessors over the inventory service endpoints. Each call is a
//! fresh round trip: no caching, no retry, no client-side filtering. Path
//! segments and query values are percent-encoded here; the token is attached
//! by [`HttpClient`].

mod auth;
mod products;
mod reports;
mod suppliers;
mod transactions;
mod users;

pub use auth::AuthApi;
pub use products::ProductsApi;
pub use reports::ReportsApi;
pub use suppliers::SuppliersApi;
pub use transactions::TransactionsApi;
pub use users::UsersApi;

use crate::http::HttpClient;

/// All fetchers over one [`HttpClient`]
#[derive(Debug, Clone)]
pub struct Api {
    pub auth: AuthApi,
    pub products: ProductsApi,
    pub suppliers: SuppliersApi,
    pub transactions: TransactionsApi,
    pub reports: ReportsApi,
    pub users: UsersApi,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthApi::new(http.clone()),
            products: ProductsApi::new(http.clone()),
            suppliers: SuppliersApi::new(http.clone()),
            transactions: TransactionsApi::new(http.clone()),
            reports: ReportsApi::new(http.clone()),
            users: UsersApi::new(http),
        }
    }
}
