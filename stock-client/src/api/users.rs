//! User management endpoints (admin only on the service side)

use shared::models::{Role, User, UserCreate, UserUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct UsersApi {
    http: HttpClient,
}

impl UsersApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn all(&self) -> ClientResult<Vec<User>> {
        self.http.get("/users").await
    }

    pub async fn active(&self) -> ClientResult<Vec<User>> {
        self.http.get("/users/active").await
    }

    pub async fn by_id(&self, id: i64) -> ClientResult<User> {
        self.http.get(&format!("/users/{}", id)).await
    }

    pub async fn by_role(&self, role: Role) -> ClientResult<Vec<User>> {
        self.http.get(&format!("/users/role/{}", role.as_str())).await
    }

    pub async fn create(&self, payload: &UserCreate) -> ClientResult<User> {
        self.http.post("/users", payload).await
    }

    pub async fn update(&self, id: i64, payload: &UserUpdate) -> ClientResult<User> {
        self.http.put(&format!("/users/{}", id), payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/users/{}", id)).await
    }
}
