//! Supplier endpoints

use shared::models::{Supplier, SupplierCreate, SupplierUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct SuppliersApi {
    http: HttpClient,
}

impl SuppliersApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn all(&self) -> ClientResult<Vec<Supplier>> {
        self.http.get("/suppliers").await
    }

    pub async fn active(&self) -> ClientResult<Vec<Supplier>> {
        self.http.get("/suppliers/active").await
    }

    pub async fn by_id(&self, id: i64) -> ClientResult<Supplier> {
        self.http.get(&format!("/suppliers/{}", id)).await
    }

    pub async fn search(&self, keyword: &str) -> ClientResult<Vec<Supplier>> {
        let path = format!("/suppliers/search?keyword={}", urlencoding::encode(keyword));
        self.http.get(&path).await
    }

    pub async fn create(&self, payload: &SupplierCreate) -> ClientResult<Supplier> {
        self.http.post("/suppliers", payload).await
    }

    pub async fn update(&self, id: i64, payload: &SupplierUpdate) -> ClientResult<Supplier> {
        self.http.put(&format!("/suppliers/{}", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/suppliers/{}", id)).await
    }
}
