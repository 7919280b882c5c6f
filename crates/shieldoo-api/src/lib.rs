// shieldoo-api: Async Rust client for the Shieldoo CLI management API (`/cliapi/`)

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use auth::{Claims, InstanceClaim, TokenIssuer};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::Error;
pub use reqwest::{Method, StatusCode};
pub use transport::TransportConfig;
