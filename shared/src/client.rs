//! Client-related types shared with the inventory service
//!
//! Auth request/response bodies used by the sign-in flow.

use serde::{Deserialize, Serialize};

use crate::models::{Identity, Role};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Sign-in request (`POST /auth/signin`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Sign-in response
///
/// Carries only a subset of the profile; the full identity comes from
/// `GET /auth/me` issued with the returned token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token scheme, always "Bearer" in practice
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl LoginResponse {
    /// Profile fragment carried by the sign-in response.
    ///
    /// Only suitable as a cache hint; a session is built from `/auth/me`.
    pub fn profile_hint(&self) -> Identity {
        Identity {
            user_id: self.id,
            username: self.username.clone(),
            role: self.role,
            display_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}
