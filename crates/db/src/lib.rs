//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the ledger tables
//! - Repositories for posting, reversal, payments, audit and reports
//! - Database migrations, including the chart of accounts seed

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AuditLogRepository, CounterSequenceAllocator, JournalEntryError, JournalEntryRepository,
    PaymentError, PaymentOutcome, PaymentRecord, PaymentRepository, PaymentRequest, PostedPair,
    PostingRepository, ReportRepository, ReportRepositoryError, SequenceAllocator,
};

use std::time::Duration;

use muniledger_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the configured pool bounds.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "connecting to database"
    );
    Database::connect(options).await
}
