//! Token Management
//!
//! OAuth2 client-credentials token lifecycle for the PIX API.

pub mod manager;

pub use manager::{DefaultTokenManager, MockTokenManager, TokenManager, TokenManagerConfig};
