//! Shared setup for database tests: in-memory `SQLite` with the ledger schema.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use muniledger_core::ledger::{
    EntryNumberFormat, JournalEntry, JournalEntryRequest, JournalLineRequest, SequenceAllocation,
    SourceType,
};
use muniledger_core::postings::PostingContext;
use muniledger_db::migration::{Migrator, MigratorTrait};
use muniledger_db::{JournalEntryError, JournalEntryRepository, SequenceAllocator};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr};
use uuid::Uuid;

/// Connects to a fresh in-memory database and runs the migrations.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// A file-backed database behind several pooled connections.
///
/// Transactions on different connections really overlap here, unlike the
/// single-connection in-memory database. The files are removed on drop.
pub struct FileDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl FileDb {
    pub async fn open(connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!("muniledger-{}.db", Uuid::new_v4()));
        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        options
            .max_connections(connections)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .expect("Failed to open file database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        Self { db, path }
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

/// Posts an entry, retrying while another connection holds the write lock.
pub async fn post_with_retry(
    repo: &JournalEntryRepository,
    request: JournalEntryRequest,
) -> JournalEntry {
    for _ in 0..100 {
        match repo.create_journal_entry(request.clone()).await {
            Ok(entry) => return entry,
            Err(JournalEntryError::Database(err)) if is_lock_contention(&err) => {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            Err(err) => panic!("posting failed: {err}"),
        }
    }
    panic!("write lock never became available");
}

fn is_lock_contention(err: &DbErr) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("locked") || message.contains("busy")
}

pub fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).expect("valid date")
}

/// A tenant with one filer and one acting user.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub tenant_id: Uuid,
    pub filer_id: Uuid,
    pub user_id: Uuid,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            tenant_id: Uuid::new_v4(),
            filer_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        }
    }

    /// Posting context for a new business event of this filer.
    pub fn context(&self, date: NaiveDate) -> PostingContext {
        PostingContext::new(self.tenant_id, self.filer_id, Uuid::new_v4(), date, self.user_id)
    }

    /// A filer-side entry request with the given lines.
    pub fn request(
        &self,
        date: NaiveDate,
        source_type: SourceType,
        description: &str,
        lines: Vec<JournalLineRequest>,
    ) -> JournalEntryRequest {
        JournalEntryRequest {
            tenant_id: self.tenant_id,
            entity_id: self.filer_id,
            entry_date: date,
            description: description.to_string(),
            source_type,
            source_id: Uuid::new_v4(),
            created_by: self.user_id,
            lines,
        }
    }

    /// Filer-side assessment entry: debit tax expense, credit tax liability.
    pub fn assessment(&self, date: NaiveDate, amount: Decimal) -> JournalEntryRequest {
        self.request(
            date,
            SourceType::Assessment,
            "Tax assessment",
            vec![
                JournalLineRequest::debit("6100", amount, None),
                JournalLineRequest::credit("2100", amount, None),
            ],
        )
    }
}

/// Allocator that always fails, to force a rollback mid-posting.
#[derive(Debug)]
pub struct FailingAllocator;

#[async_trait::async_trait]
impl SequenceAllocator for FailingAllocator {
    async fn allocate(
        &self,
        _txn: &DatabaseTransaction,
        _tenant_id: Uuid,
        _format: &EntryNumberFormat,
        _year: i32,
    ) -> Result<SequenceAllocation, DbErr> {
        Err(DbErr::Custom("sequence unavailable".to_string()))
    }
}
