//! Construction of reversing entries.
//!
//! A posted entry is never edited. It is corrected by posting a new entry
//! with every line's debit and credit swapped.

use uuid::Uuid;

use super::error::LedgerError;
use super::types::{JournalEntry, JournalEntryRequest, JournalLineRequest};
use super::validation::LedgerValidator;

/// Prefix applied to reversal descriptions.
pub const REVERSAL_PREFIX: &str = "Reversal: ";

/// Builds reversing entry requests.
pub struct ReversalService;

impl ReversalService {
    /// Builds the request that reverses `original`.
    ///
    /// Date, source and ownership are copied; each line keeps its account
    /// and position with debit and credit swapped.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyReversed` if `original` was already reversed.
    pub fn build_reversal_request(
        original: &JournalEntry,
        reversed_by: Uuid,
        reason: &str,
    ) -> Result<JournalEntryRequest, LedgerError> {
        LedgerValidator::validate_can_reverse(original)?;

        let description = if reason.trim().is_empty() {
            format!("{REVERSAL_PREFIX}{}", original.description)
        } else {
            format!("{REVERSAL_PREFIX}{} ({})", original.description, reason.trim())
        };

        let lines = original
            .lines
            .iter()
            .map(|line| JournalLineRequest {
                account_number: line.account_number.clone(),
                debit: line.credit,
                credit: line.debit,
                description: line
                    .description
                    .as_ref()
                    .map(|d| format!("{REVERSAL_PREFIX}{d}")),
            })
            .collect();

        Ok(JournalEntryRequest {
            tenant_id: original.tenant_id,
            entity_id: original.entity_id,
            entry_date: original.entry_date,
            description,
            source_type: original.source_type,
            source_id: original.source_id,
            created_by: reversed_by,
            lines,
        })
    }
}
