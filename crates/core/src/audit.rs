//! Audit trail records.
//!
//! Every mutating ledger call appends exactly one row per action. Rows are
//! never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::types::JournalEntry;

/// Entity type tag for journal entries.
pub const ENTITY_JOURNAL_ENTRY: &str = "JOURNAL_ENTRY";
/// Entity type tag for payment transactions.
pub const ENTITY_PAYMENT: &str = "PAYMENT";

/// Action verb for a newly posted entry.
pub const ACTION_CREATED: &str = "CREATED";
/// Action verb for a reversed entry.
pub const ACTION_REVERSED: &str = "REVERSED";
/// Action verb for a processed payment.
pub const ACTION_PROCESSED: &str = "PROCESSED";

/// Input for appending an audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogInput {
    /// Id of the audited record.
    pub entity_id: Uuid,
    /// Kind of the audited record, e.g. `JOURNAL_ENTRY`.
    pub entity_type: String,
    /// Free-text verb.
    pub action: String,
    /// Acting user.
    pub user_id: Uuid,
    /// Tenant.
    pub tenant_id: Uuid,
    /// Human-readable details.
    pub details: String,
    /// Prior state, when the action changed one.
    pub old_value: Option<String>,
    /// New state, when the action changed one.
    pub new_value: Option<String>,
    /// Reason supplied by the user.
    pub reason: Option<String>,
}

impl AuditLogInput {
    /// Audit row for a newly posted journal entry.
    #[must_use]
    pub fn journal_entry_created(entry: &JournalEntry) -> Self {
        let totals = entry.totals();
        Self {
            entity_id: entry.entry_id,
            entity_type: ENTITY_JOURNAL_ENTRY.to_string(),
            action: ACTION_CREATED.to_string(),
            user_id: entry.created_by,
            tenant_id: entry.tenant_id,
            details: format!(
                "Created journal entry {} ({}, {} lines, total {})",
                entry.entry_number,
                entry.source_type,
                entry.lines.len(),
                totals.total_debit
            ),
            old_value: None,
            new_value: Some(entry.status.to_string()),
            reason: None,
        }
    }

    /// Audit row for the reversal of `original` by `reversal`.
    #[must_use]
    pub fn journal_entry_reversed(
        original: &JournalEntry,
        reversal: &JournalEntry,
        user_id: Uuid,
        reason: &str,
    ) -> Self {
        Self {
            entity_id: original.entry_id,
            entity_type: ENTITY_JOURNAL_ENTRY.to_string(),
            action: ACTION_REVERSED.to_string(),
            user_id,
            tenant_id: original.tenant_id,
            details: format!(
                "Reversed journal entry {} with {}",
                original.entry_number, reversal.entry_number
            ),
            old_value: Some(original.status.to_string()),
            new_value: Some(crate::ledger::types::EntryStatus::Reversed.to_string()),
            reason: Some(reason.to_string()),
        }
    }

    /// Audit row for a processed payment, whatever its outcome.
    #[must_use]
    pub fn payment_processed(
        payment_id: Uuid,
        tenant_id: Uuid,
        user_id: Uuid,
        status: &str,
        details: String,
    ) -> Self {
        Self {
            entity_id: payment_id,
            entity_type: ENTITY_PAYMENT.to_string(),
            action: ACTION_PROCESSED.to_string(),
            user_id,
            tenant_id,
            details,
            old_value: None,
            new_value: Some(status.to_string()),
            reason: None,
        }
    }
}

/// A persisted audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Row id.
    pub audit_id: Uuid,
    /// Id of the audited record.
    pub entity_id: Uuid,
    /// Kind of the audited record.
    pub entity_type: String,
    /// Free-text verb.
    pub action: String,
    /// Acting user.
    pub user_id: Uuid,
    /// Tenant.
    pub tenant_id: Uuid,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Human-readable details.
    pub details: String,
    /// Prior state.
    pub old_value: Option<String>,
    /// New state.
    pub new_value: Option<String>,
    /// Reason supplied by the user.
    pub reason: Option<String>,
}
