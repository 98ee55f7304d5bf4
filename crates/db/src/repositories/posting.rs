//! Dual posting repository.
//!
//! Posts the filer-side and municipality-side entries of one business event
//! in a single transaction, so either both exist or neither does.

use muniledger_core::ledger::JournalEntry;
use muniledger_core::postings::{
    AssessmentAmounts, DualPosting, PostingContext, RefundPostings, TaxAssessmentPostings,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::journal_entry::{JournalEntryError, JournalEntryRepository};

/// Both persisted entries of one business event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedPair {
    /// Shared business event id.
    pub source_id: Uuid,
    /// Entry on the filer sub-ledger.
    pub filer_entry: JournalEntry,
    /// Entry on the municipality sub-ledger.
    pub municipality_entry: JournalEntry,
}

/// Dual posting repository.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    journal: JournalEntryRepository,
}

impl PostingRepository {
    /// Creates a posting repository with default entry numbering.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_journal(JournalEntryRepository::new(db))
    }

    /// Creates a posting repository on top of an existing journal repository.
    #[must_use]
    pub const fn with_journal(journal: JournalEntryRepository) -> Self {
        Self { journal }
    }

    /// Posts both sides of a prepared dual posting atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if either entry is rejected or the database fails;
    /// in both cases nothing is persisted.
    pub async fn record(&self, posting: DualPosting) -> Result<PostedPair, JournalEntryError> {
        let txn = self.journal.connection().begin().await?;
        let pair = post_pair_in(&self.journal, &txn, posting).await?;
        txn.commit().await?;
        Ok(pair)
    }

    /// Records an assessment of already-computed tax, penalty and interest.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount is invalid or the database fails.
    pub async fn record_assessment(
        &self,
        ctx: &PostingContext,
        amounts: AssessmentAmounts,
        label: &str,
    ) -> Result<PostedPair, JournalEntryError> {
        let posting = TaxAssessmentPostings::assessment(ctx, amounts, label)?;
        self.record(posting).await
    }

    /// Records a refund request against an overpayment validated by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the database fails.
    pub async fn record_refund_request(
        &self,
        ctx: &PostingContext,
        amount: Decimal,
        label: &str,
    ) -> Result<PostedPair, JournalEntryError> {
        let posting = RefundPostings::request(ctx, amount, label)?;
        self.record(posting).await
    }

    /// Records the payout of a previously requested refund.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the database fails.
    pub async fn record_refund_issuance(
        &self,
        ctx: &PostingContext,
        amount: Decimal,
        label: &str,
    ) -> Result<PostedPair, JournalEntryError> {
        let posting = RefundPostings::issuance(ctx, amount, label)?;
        self.record(posting).await
    }
}

/// Posts both entries of `posting` inside the caller's transaction.
pub(crate) async fn post_pair_in(
    journal: &JournalEntryRepository,
    txn: &DatabaseTransaction,
    posting: DualPosting,
) -> Result<PostedPair, JournalEntryError> {
    let filer_entry = journal.post_in(txn, posting.filer_entry).await?;
    let municipality_entry = journal.post_in(txn, posting.municipality_entry).await?;

    tracing::info!(
        source_id = %posting.source_id,
        filer_entry = %filer_entry.entry_number,
        municipality_entry = %municipality_entry.entry_number,
        "Dual posting recorded"
    );
    Ok(PostedPair {
        source_id: posting.source_id,
        filer_entry,
        municipality_entry,
    })
}
