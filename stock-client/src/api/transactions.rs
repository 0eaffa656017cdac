//! Inventory transaction endpoints

use shared::models::{Transaction, TransactionCreate, TransactionType, TransactionUpdate};
use shared::types::DateRange;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct TransactionsApi {
    http: HttpClient,
}

impl TransactionsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn all(&self) -> ClientResult<Vec<Transaction>> {
        self.http.get("/transactions").await
    }

    pub async fn by_id(&self, id: i64) -> ClientResult<Transaction> {
        self.http.get(&format!("/transactions/{}", id)).await
    }

    pub async fn by_product(&self, product_id: i64) -> ClientResult<Vec<Transaction>> {
        self.http
            .get(&format!("/transactions/product/{}", product_id))
            .await
    }

    pub async fn by_user(&self, user_id: i64) -> ClientResult<Vec<Transaction>> {
        self.http.get(&format!("/transactions/user/{}", user_id)).await
    }

    pub async fn by_type(&self, kind: TransactionType) -> ClientResult<Vec<Transaction>> {
        self.http
            .get(&format!("/transactions/type/{}", kind.as_str()))
            .await
    }

    /// Transactions dated within `range`, both ends inclusive
    pub async fn by_date_range(&self, range: DateRange) -> ClientResult<Vec<Transaction>> {
        self.http
            .get(&format!("/transactions/date-range?{}", range.to_query()))
            .await
    }

    pub async fn create(&self, payload: &TransactionCreate) -> ClientResult<Transaction> {
        self.http.post("/transactions", payload).await
    }

    pub async fn update(&self, id: i64, payload: &TransactionUpdate) -> ClientResult<Transaction> {
        self.http.put(&format!("/transactions/{}", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/transactions/{}", id)).await
    }
}
