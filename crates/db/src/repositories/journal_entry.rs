//! Journal entry repository: posting, reversal and entry queries.
//!
//! Every mutating call validates first and then writes the header, the lines
//! and the audit row inside one database transaction. A failed call leaves
//! nothing behind.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use muniledger_core::audit::AuditLogInput;
use muniledger_core::chart::{Account, ChartOfAccounts};
use muniledger_core::ledger::{
    EntryNumberFormat, EntryStatus, JournalEntry, JournalEntryLine, JournalEntryRequest,
    LedgerError, LedgerValidator, ReversalService,
};
use muniledger_shared::types::Money;
use muniledger_shared::{AppError, LedgerConfig};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::audit_log::AuditLogRepository;
use super::sequence::{CounterSequenceAllocator, SequenceAllocator};
use crate::entities::{
    accounts, journal_entries, journal_entry_lines, sea_orm_active_enums,
};

/// Error types for journal entry operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalEntryError {
    /// Validation or state error raised by the ledger rules.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl JournalEntryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(err) => err.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Ledger(err) => err.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

impl From<JournalEntryError> for AppError {
    fn from(err: JournalEntryError) -> Self {
        match err {
            JournalEntryError::Ledger(err) => err.into(),
            JournalEntryError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Journal entry repository.
#[derive(Debug, Clone)]
pub struct JournalEntryRepository {
    db: DatabaseConnection,
    format: EntryNumberFormat,
    allocator: Arc<dyn SequenceAllocator>,
}

impl JournalEntryRepository {
    /// Creates a repository with the default `JE-<year>-<5 digits>` numbering.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            format: EntryNumberFormat::default(),
            allocator: Arc::new(CounterSequenceAllocator::new()),
        }
    }

    /// Creates a repository numbering entries as configured.
    #[must_use]
    pub fn with_config(db: DatabaseConnection, config: &LedgerConfig) -> Self {
        Self {
            format: EntryNumberFormat::new(
                config.entry_number_prefix.clone(),
                config.sequence_width,
            ),
            ..Self::new(db)
        }
    }

    /// Replaces the sequence allocator.
    #[must_use]
    pub fn with_allocator(mut self, allocator: Arc<dyn SequenceAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The entry number format in use.
    #[must_use]
    pub const fn format(&self) -> &EntryNumberFormat {
        &self.format
    }

    /// Validates and posts a journal entry.
    ///
    /// Writes exactly one entry with its lines and one audit row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entry is empty, has a negative amount or an unknown account
    /// - Debits and credits differ
    /// - Database operation fails
    pub async fn create_journal_entry(
        &self,
        request: JournalEntryRequest,
    ) -> Result<JournalEntry, JournalEntryError> {
        let txn = self.db.begin().await?;
        let entry = self.post_in(&txn, request).await?;
        txn.commit().await?;
        Ok(entry)
    }

    /// Posts a journal entry inside a caller-owned transaction.
    ///
    /// Nothing is committed here; the caller commits or rolls back.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_journal_entry`].
    pub async fn post_in(
        &self,
        txn: &DatabaseTransaction,
        request: JournalEntryRequest,
    ) -> Result<JournalEntry, JournalEntryError> {
        // Allocate before any read so SQLite takes the write lock up front
        // instead of failing a stale read snapshot. A rejected entry rolls the
        // counter back with the transaction.
        let year = request.entry_date.year();
        let allocation = self
            .allocator
            .allocate(txn, request.tenant_id, &self.format, year)
            .await?;

        let chart = load_chart(txn).await?;
        let totals = LedgerValidator::validate(&request, &chart)?;

        if let Some(warning) = &allocation.warning {
            tracing::warn!(
                tenant_id = %request.tenant_id,
                %warning,
                sequence = allocation.value,
                "Entry number sequence fell back"
            );
        }
        let entry_number = self.format.format(year, allocation.value);

        let entry = self.insert_entry(txn, request, entry_number).await?;
        AuditLogRepository::append(txn, AuditLogInput::journal_entry_created(&entry)).await?;

        tracing::info!(
            tenant_id = %entry.tenant_id,
            entity_id = %entry.entity_id,
            entry_number = %entry.entry_number,
            source_id = %entry.source_id,
            total = %totals.total_debit,
            "Journal entry posted"
        );
        Ok(entry)
    }

    /// Inserts the header and lines of a validated entry.
    async fn insert_entry(
        &self,
        txn: &DatabaseTransaction,
        request: JournalEntryRequest,
        entry_number: String,
    ) -> Result<JournalEntry, JournalEntryError> {
        let now = Utc::now();
        let entry_id = Uuid::new_v4();

        let header = journal_entries::ActiveModel {
            entry_id: Set(entry_id),
            entry_number: Set(entry_number.clone()),
            entry_date: Set(request.entry_date),
            description: Set(request.description.clone()),
            source_type: Set(request.source_type.into()),
            source_id: Set(request.source_id),
            status: Set(sea_orm_active_enums::EntryStatus::Posted),
            tenant_id: Set(request.tenant_id),
            entity_id: Set(request.entity_id),
            created_by: Set(request.created_by),
            created_at: Set(now.into()),
            posted_at: Set(now.into()),
            reversed_by: Set(None),
            reversed_at: Set(None),
            reversal_entry_id: Set(None),
        };
        header.insert(txn).await?;

        let mut lines = Vec::with_capacity(request.lines.len());
        for (line_number, line) in (1u32..).zip(request.lines) {
            let line_id = Uuid::new_v4();
            let (debit, credit) = (Money::normalize(line.debit), Money::normalize(line.credit));
            let row = journal_entry_lines::ActiveModel {
                line_id: Set(line_id),
                entry_id: Set(entry_id),
                account_number: Set(line.account_number.clone()),
                line_number: Set(i32::try_from(line_number)
                    .map_err(|_| LedgerError::Internal("too many lines".to_string()))?),
                debit: Set(debit),
                credit: Set(credit),
                description: Set(line.description.clone()),
            };
            row.insert(txn).await?;

            lines.push(JournalEntryLine {
                line_id,
                account_number: line.account_number,
                line_number,
                debit,
                credit,
                description: line.description,
            });
        }

        Ok(JournalEntry {
            entry_id,
            entry_number,
            entry_date: request.entry_date,
            description: request.description,
            source_type: request.source_type,
            source_id: request.source_id,
            status: EntryStatus::Posted,
            tenant_id: request.tenant_id,
            entity_id: request.entity_id,
            created_by: request.created_by,
            created_at: now,
            posted_at: now,
            reversed_by: None,
            reversed_at: None,
            reversal_entry_id: None,
            lines,
        })
    }

    /// Reverses a posted entry and returns the new reversing entry.
    ///
    /// The reversing entry mirrors the original with debits and credits
    /// swapped. The original is flagged REVERSED and linked to it. Two audit
    /// rows are written: the reversing entry's creation and the reversal.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entry does not exist
    /// - The entry is already reversed
    /// - Database operation fails
    pub async fn reverse_entry(
        &self,
        entry_id: Uuid,
        user_id: Uuid,
        reason: &str,
    ) -> Result<JournalEntry, JournalEntryError> {
        let txn = self.db.begin().await?;

        let original = find_entry(&txn, entry_id)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        let request = ReversalService::build_reversal_request(&original, user_id, reason)?;
        let reversal = self.post_in(&txn, request).await?;

        let now = Utc::now();
        // Conditional on POSTED so a concurrent reversal loses cleanly.
        let flipped = journal_entries::Entity::update_many()
            .set(journal_entries::ActiveModel {
                status: Set(sea_orm_active_enums::EntryStatus::Reversed),
                reversed_by: Set(Some(user_id)),
                reversed_at: Set(Some(now.into())),
                reversal_entry_id: Set(Some(reversal.entry_id)),
                ..Default::default()
            })
            .filter(journal_entries::Column::EntryId.eq(entry_id))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::EntryStatus::Posted))
            .exec(&txn)
            .await?;
        if flipped.rows_affected == 0 {
            return Err(LedgerError::AlreadyReversed(entry_id).into());
        }

        AuditLogRepository::append(
            &txn,
            AuditLogInput::journal_entry_reversed(&original, &reversal, user_id, reason),
        )
        .await?;

        txn.commit().await?;

        tracing::info!(
            tenant_id = %original.tenant_id,
            entry_number = %original.entry_number,
            reversal_number = %reversal.entry_number,
            "Journal entry reversed"
        );
        Ok(reversal)
    }

    /// Gets one entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EntryNotFound` if the entry does not exist.
    pub async fn get_entry(&self, entry_id: Uuid) -> Result<JournalEntry, JournalEntryError> {
        find_entry(&self.db, entry_id)
            .await?
            .ok_or_else(|| LedgerError::EntryNotFound(entry_id).into())
    }

    /// Lists an entity's entries, newest first in ledger order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_entries_for_entity(
        &self,
        tenant_id: Uuid,
        entity_id: Uuid,
    ) -> Result<Vec<JournalEntry>, JournalEntryError> {
        let headers = journal_entries::Entity::find()
            .filter(journal_entries::Column::TenantId.eq(tenant_id))
            .filter(journal_entries::Column::EntityId.eq(entity_id))
            .order_by_desc(journal_entries::Column::EntryDate)
            .all(&self.db)
            .await?;

        let mut entries = hydrate(&self.db, headers).await?;
        entries.sort_by(|a, b| b.ledger_order_key().cmp(&a.ledger_order_key()));
        Ok(entries)
    }

    /// Lists the entries posted for one business event, in posting order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_entries_by_source(
        &self,
        tenant_id: Uuid,
        source_id: Uuid,
    ) -> Result<Vec<JournalEntry>, JournalEntryError> {
        let headers = journal_entries::Entity::find()
            .filter(journal_entries::Column::TenantId.eq(tenant_id))
            .filter(journal_entries::Column::SourceId.eq(source_id))
            .all(&self.db)
            .await?;

        let mut entries = hydrate(&self.db, headers).await?;
        entries.sort_by(|a, b| a.ledger_order_key().cmp(&b.ledger_order_key()));
        Ok(entries)
    }
}

/// Loads the chart of accounts from the `accounts` table.
pub(crate) async fn load_chart<C>(conn: &C) -> Result<ChartOfAccounts, DbErr>
where
    C: ConnectionTrait,
{
    let rows = accounts::Entity::find().all(conn).await?;
    Ok(ChartOfAccounts::new(rows.into_iter().map(|row| {
        Account::new(&row.account_number, &row.account_name, row.account_type.into())
    })))
}

async fn find_entry<C>(conn: &C, entry_id: Uuid) -> Result<Option<JournalEntry>, DbErr>
where
    C: ConnectionTrait,
{
    let Some(header) = journal_entries::Entity::find_by_id(entry_id).one(conn).await? else {
        return Ok(None);
    };
    Ok(hydrate(conn, vec![header]).await?.pop())
}

/// Attaches lines to entry headers, keeping the header order.
///
/// Lines are fetched in one query and sorted by line number.
pub(crate) async fn hydrate<C>(
    conn: &C,
    headers: Vec<journal_entries::Model>,
) -> Result<Vec<JournalEntry>, DbErr>
where
    C: ConnectionTrait,
{
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = headers.iter().map(|h| h.entry_id).collect();
    let rows = journal_entry_lines::Entity::find()
        .filter(journal_entry_lines::Column::EntryId.is_in(ids))
        .order_by_asc(journal_entry_lines::Column::LineNumber)
        .all(conn)
        .await?;

    let mut by_entry: HashMap<Uuid, Vec<JournalEntryLine>> = HashMap::new();
    for row in rows {
        let line_number = u32::try_from(row.line_number)
            .map_err(|_| DbErr::Custom(format!("invalid line number {}", row.line_number)))?;
        by_entry.entry(row.entry_id).or_default().push(JournalEntryLine {
            line_id: row.line_id,
            account_number: row.account_number,
            line_number,
            debit: Money::normalize(row.debit),
            credit: Money::normalize(row.credit),
            description: row.description,
        });
    }

    Ok(headers
        .into_iter()
        .map(|header| {
            let mut lines = by_entry.remove(&header.entry_id).unwrap_or_default();
            lines.sort_by_key(|line| line.line_number);
            to_domain(header, lines)
        })
        .collect())
}

fn to_domain(header: journal_entries::Model, lines: Vec<JournalEntryLine>) -> JournalEntry {
    JournalEntry {
        entry_id: header.entry_id,
        entry_number: header.entry_number,
        entry_date: header.entry_date,
        description: header.description,
        source_type: header.source_type.into(),
        source_id: header.source_id,
        status: header.status.into(),
        tenant_id: header.tenant_id,
        entity_id: header.entity_id,
        created_by: header.created_by,
        created_at: header.created_at.with_timezone(&Utc),
        posted_at: header.posted_at.with_timezone(&Utc),
        reversed_by: header.reversed_by,
        reversed_at: header.reversed_at.map(|at| at.with_timezone(&Utc)),
        reversal_entry_id: header.reversal_entry_id,
        lines,
    }
}
