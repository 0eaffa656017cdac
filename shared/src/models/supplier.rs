//! Supplier Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Create supplier payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierCreate {
    #[validate(length(min = 1, max = 100, message = "Supplier name is required (max 100 characters)"))]
    pub name: String,
    #[validate(length(max = 200, message = "Address must not exceed 200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(length(max = 20, message = "Phone must not exceed 20 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email(message = "Email should be valid"), length(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "Contact person must not exceed 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

/// Update supplier payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierUpdate {
    #[validate(length(min = 1, max = 100, message = "Supplier name is required (max 100 characters)"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 200, message = "Address must not exceed 200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(length(max = 20, message = "Phone must not exceed 20 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(email(message = "Email should be valid"), length(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "Contact person must not exceed 50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
