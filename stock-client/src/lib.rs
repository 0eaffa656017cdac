//! Stock Client - decision-support client for the inventory service
//!
//! Session/authorization gate, typed fetchers and view orchestrators over
//! the inventory HTTP API. Aggregations live in `shared::analytics`.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod session;
pub mod views;

pub use client::StockClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use crate::http::{HttpClient, NetworkTransport, OneshotTransport, Transport};
pub use session::{Action, SessionEvent, SessionState, SessionStore, View};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse};
pub use shared::models::Identity;
