//! Builders
//!
//! Fluent builder for PIX client configuration.

pub mod config;

pub use config::PixConfigBuilder;
