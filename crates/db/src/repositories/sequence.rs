//! Entry number allocation.
//!
//! Numbers come from a counter row per tenant and year prefix in
//! `entry_sequences`. Each allocation first bumps that row with a single
//! atomic `UPDATE` inside the posting transaction. Concurrent posters in the
//! same scope serialize on the row, so no two of them see the same value, and
//! a rolled back transaction gives its value back.
//!
//! The first allocation in a scope seeds the row from the highest existing
//! entry number. Two transactions racing to seed both insert with
//! `ON CONFLICT DO NOTHING`; the loser then bumps the winner's row.

use std::fmt;

use muniledger_core::ledger::{EntryNumberFormat, SequenceAllocation};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{entry_sequences, journal_entries};

/// Hands out entry sequence values inside a posting transaction.
#[async_trait::async_trait]
pub trait SequenceAllocator: Send + Sync + fmt::Debug {
    /// Allocates the next sequence value for `tenant_id` in `year`.
    ///
    /// A recoverable problem with existing numbers is reported as a warning
    /// on the allocation, never as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn allocate(
        &self,
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
        format: &EntryNumberFormat,
        year: i32,
    ) -> Result<SequenceAllocation, DbErr>;
}

/// Allocator backed by the `entry_sequences` counter table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterSequenceAllocator;

impl CounterSequenceAllocator {
    /// Creates the allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Increments the scope's counter. Returns false if the row does not exist.
    async fn bump(txn: &DatabaseTransaction, tenant_id: Uuid, prefix: &str) -> Result<bool, DbErr> {
        let result = entry_sequences::Entity::update_many()
            .col_expr(
                entry_sequences::Column::LastValue,
                Expr::col(entry_sequences::Column::LastValue).add(1),
            )
            .filter(entry_sequences::Column::TenantId.eq(tenant_id))
            .filter(entry_sequences::Column::Prefix.eq(prefix))
            .exec(txn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn current(
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
        prefix: &str,
    ) -> Result<SequenceAllocation, DbErr> {
        let counter = entry_sequences::Entity::find_by_id((tenant_id, prefix.to_string()))
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("entry sequence {prefix}")))?;
        let value = u64::try_from(counter.last_value)
            .map_err(|_| DbErr::Custom(format!("negative sequence value for {prefix}")))?;
        Ok(SequenceAllocation::clean(value))
    }

    /// Derives the first value of a scope from the entries already in it.
    async fn seed(
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
        format: &EntryNumberFormat,
        prefix: &str,
    ) -> Result<SequenceAllocation, DbErr> {
        let numbers: Vec<String> = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::EntryNumber)
            .filter(journal_entries::Column::TenantId.eq(tenant_id))
            .filter(journal_entries::Column::EntryNumber.starts_with(format!("{prefix}-")))
            .into_tuple()
            .all(txn)
            .await?;
        Ok(format.next_after_highest(numbers.iter().map(String::as_str)))
    }
}

#[async_trait::async_trait]
impl SequenceAllocator for CounterSequenceAllocator {
    async fn allocate(
        &self,
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
        format: &EntryNumberFormat,
        year: i32,
    ) -> Result<SequenceAllocation, DbErr> {
        let prefix = format.year_prefix(year);
        if Self::bump(txn, tenant_id, &prefix).await? {
            return Self::current(txn, tenant_id, &prefix).await;
        }

        let seed = Self::seed(txn, tenant_id, format, &prefix).await?;
        let last_value = i64::try_from(seed.value)
            .map_err(|_| DbErr::Custom(format!("sequence overflow for {prefix}")))?;
        let inserted = entry_sequences::Entity::insert(entry_sequences::ActiveModel {
            tenant_id: Set(tenant_id),
            prefix: Set(prefix.clone()),
            last_value: Set(last_value),
        })
        .on_conflict(
            OnConflict::columns([
                entry_sequences::Column::TenantId,
                entry_sequences::Column::Prefix,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;
        if inserted > 0 {
            return Ok(seed);
        }

        // Seeded by a concurrent transaction since the first bump.
        if !Self::bump(txn, tenant_id, &prefix).await? {
            return Err(DbErr::RecordNotFound(format!("entry sequence {prefix}")));
        }
        Self::current(txn, tenant_id, &prefix).await
    }
}
