//! Auth endpoints

use shared::client::{LoginRequest, LoginResponse};
use shared::models::Identity;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `POST /auth/signin`
    pub async fn sign_in(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.http.post("/auth/signin", request).await
    }

    /// `GET /auth/me` with the current (or pending) token
    pub async fn me(&self) -> ClientResult<Identity> {
        self.http.get("/auth/me").await
    }
}
