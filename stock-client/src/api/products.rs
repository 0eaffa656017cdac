//! Product endpoints

use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ProductsApi {
    http: HttpClient,
}

impl ProductsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn all(&self) -> ClientResult<Vec<Product>> {
        self.http.get("/products").await
    }

    pub async fn active(&self) -> ClientResult<Vec<Product>> {
        self.http.get("/products/active").await
    }

    pub async fn by_id(&self, id: i64) -> ClientResult<Product> {
        self.http.get(&format!("/products/{}", id)).await
    }

    pub async fn by_category(&self, category: &str) -> ClientResult<Vec<Product>> {
        let path = format!("/products/category/{}", urlencoding::encode(category));
        self.http.get(&path).await
    }

    pub async fn by_supplier(&self, supplier_id: i64) -> ClientResult<Vec<Product>> {
        self.http
            .get(&format!("/products/supplier/{}", supplier_id))
            .await
    }

    /// Server-side keyword search
    pub async fn search(&self, keyword: &str) -> ClientResult<Vec<Product>> {
        let path = format!("/products/search?keyword={}", urlencoding::encode(keyword));
        self.http.get(&path).await
    }

    /// Products at or below their minimum stock, as judged by the service
    pub async fn low_stock(&self) -> ClientResult<Vec<Product>> {
        self.http.get("/products/low-stock").await
    }

    pub async fn categories(&self) -> ClientResult<Vec<String>> {
        self.http.get("/products/categories").await
    }

    pub async fn create(&self, payload: &ProductCreate) -> ClientResult<Product> {
        self.http.post("/products", payload).await
    }

    pub async fn update(&self, id: i64, payload: &ProductUpdate) -> ClientResult<Product> {
        self.http.put(&format!("/products/{}", id), payload).await
    }

    /// `PATCH /products/{id}/stock?stock=`
    pub async fn update_stock(&self, id: i64, stock: i32) -> ClientResult<()> {
        self.http
            .patch_empty(&format!("/products/{}/stock?stock={}", id, stock))
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/products/{}", id)).await
    }
}
