//! Shared types, errors, and configuration for the municipal tax ledger.
//!
//! This crate provides common types used across all other crates:
//! - Money formatting with fixed two-decimal precision
//! - Pagination types for list queries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, LedgerConfig, LoggingConfig};
pub use error::AppError;
