//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Journal entry request and persisted types
//! - Entry number formatting and sequence derivation
//! - Balance validation against the chart of accounts
//! - Reversing entry construction
//! - Error types for ledger operations

pub mod entry;
pub mod error;
pub mod reversal;
pub mod types;
pub mod validation;

#[cfg(test)]
mod reversal_props;
#[cfg(test)]
mod validation_props;

pub use entry::{EntryNumberFormat, SequenceAllocation, SequenceWarning};
pub use error::LedgerError;
pub use reversal::{REVERSAL_PREFIX, ReversalService};
pub use types::{
    EntryStatus, EntryTotals, JournalEntry, JournalEntryLine, JournalEntryRequest,
    JournalLineRequest, SourceType,
};
pub use validation::LedgerValidator;
