//! Shared types and configuration for Apportion.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency types with decimal precision
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{Currency, Money};
