//! Ledger domain types for journal entry creation and reporting.
//!
//! This module defines the request types accepted by the posting path and the
//! persisted journal entry shape read back by the report builders.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::sequence_suffix;

/// Journal entry status.
///
/// Entries are created POSTED and can only move to REVERSED; the lines of an
/// entry never change after posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// Entry has been posted to the ledger.
    Posted,
    /// Entry has been reversed by a later reversing entry.
    Reversed,
}

impl EntryStatus {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posted => "POSTED",
            Self::Reversed => "REVERSED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business event that produced a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// Tax assessment.
    Assessment,
    /// Payment received.
    Payment,
    /// Refund requested or issued.
    Refund,
    /// Manual adjustment.
    Adjustment,
    /// Stand-alone penalty charge.
    Penalty,
    /// Stand-alone interest charge.
    Interest,
}

impl SourceType {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assessment => "ASSESSMENT",
            Self::Payment => "PAYMENT",
            Self::Refund => "REFUND",
            Self::Adjustment => "ADJUSTMENT",
            Self::Penalty => "PENALTY",
            Self::Interest => "INTEREST",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASSESSMENT" => Ok(Self::Assessment),
            "PAYMENT" => Ok(Self::Payment),
            "REFUND" => Ok(Self::Refund),
            "ADJUSTMENT" => Ok(Self::Adjustment),
            "PENALTY" => Ok(Self::Penalty),
            "INTEREST" => Ok(Self::Interest),
            _ => Err(format!("Unknown source type: {s}")),
        }
    }
}

/// One requested line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineRequest {
    /// The account to post to.
    pub account_number: String,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
    /// Optional line-level description.
    pub description: Option<String>,
}

impl JournalLineRequest {
    /// A debit line.
    #[must_use]
    pub fn debit(account_number: &str, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account_number: account_number.to_string(),
            debit: amount,
            credit: Decimal::ZERO,
            description,
        }
    }

    /// A credit line.
    #[must_use]
    pub fn credit(account_number: &str, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account_number: account_number.to_string(),
            debit: Decimal::ZERO,
            credit: amount,
            description,
        }
    }
}

/// Input for creating a new journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryRequest {
    /// The tenant (municipality) this entry belongs to.
    pub tenant_id: Uuid,
    /// The ledger owner: a filer or the municipality pseudo-entity.
    pub entity_id: Uuid,
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
    /// Entry-level description.
    pub description: String,
    /// Business event type.
    pub source_type: SourceType,
    /// Business event id shared by the filer-side and municipality-side entries.
    pub source_id: Uuid,
    /// The user creating the entry.
    pub created_by: Uuid,
    /// Ordered lines; numbered 1..N on posting.
    pub lines: Vec<JournalLineRequest>,
}

/// A persisted journal entry line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    /// Line id.
    pub line_id: Uuid,
    /// Account posted to.
    pub account_number: String,
    /// 1-based position within the entry.
    pub line_number: u32,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional line-level description.
    pub description: Option<String>,
}

/// A persisted journal entry with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Generated identity.
    pub entry_id: Uuid,
    /// Human-readable number, `JE-<year>-<sequence>`.
    pub entry_number: String,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Entry-level description.
    pub description: String,
    /// Business event type.
    pub source_type: SourceType,
    /// Business event id.
    pub source_id: Uuid,
    /// Current status.
    pub status: EntryStatus,
    /// Tenant.
    pub tenant_id: Uuid,
    /// Ledger owner.
    pub entity_id: Uuid,
    /// Creating user.
    pub created_by: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Posting time.
    pub posted_at: DateTime<Utc>,
    /// User who reversed the entry.
    pub reversed_by: Option<Uuid>,
    /// Reversal time.
    pub reversed_at: Option<DateTime<Utc>>,
    /// The reversing entry, set only when reversed.
    pub reversal_entry_id: Option<Uuid>,
    /// Lines in line-number order.
    pub lines: Vec<JournalEntryLine>,
}

impl JournalEntry {
    /// Sums the entry's lines.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::new(
            self.lines.iter().map(|l| l.debit).sum(),
            self.lines.iter().map(|l| l.credit).sum(),
        )
    }

    /// Returns true once a reversing entry has been posted for this entry.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.status == EntryStatus::Reversed
    }

    /// Calendar year used for entry numbering.
    #[must_use]
    pub fn year(&self) -> i32 {
        chrono::Datelike::year(&self.entry_date)
    }

    /// Ledger order: accounting date, then the numeric entry sequence.
    ///
    /// `JE-2025-100000` follows `JE-2025-99999`. A number without a numeric
    /// suffix sorts after the numbered entries of its date.
    #[must_use]
    pub fn ledger_order_key(&self) -> (NaiveDate, u64, &str) {
        let sequence = sequence_suffix(&self.entry_number).unwrap_or(u64::MAX);
        (self.entry_date, sequence, &self.entry_number)
    }
}

/// Entry totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_entry_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(500.00), dec!(400.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(100.00));
    }

    #[test]
    fn test_exact_decimal_equality() {
        // 0.1 + 0.2 must equal 0.3 exactly
        let totals = EntryTotals::new(dec!(0.1) + dec!(0.2), dec!(0.3));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_ledger_order_key_is_numeric() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let now = Utc::now();
        let make = |number: &str| JournalEntry {
            entry_id: Uuid::new_v4(),
            entry_number: number.to_string(),
            entry_date: date,
            description: String::new(),
            source_type: SourceType::Adjustment,
            source_id: Uuid::new_v4(),
            status: EntryStatus::Posted,
            tenant_id: Uuid::nil(),
            entity_id: Uuid::nil(),
            created_by: Uuid::nil(),
            created_at: now,
            posted_at: now,
            reversed_by: None,
            reversed_at: None,
            reversal_entry_id: None,
            lines: vec![],
        };

        let mut entries = vec![make("JE-2025-100000"), make("JE-2025-IMPORT"), make("JE-2025-99999")];
        entries.sort_by(|a, b| a.ledger_order_key().cmp(&b.ledger_order_key()));
        let numbers: Vec<&str> = entries.iter().map(|e| e.entry_number.as_str()).collect();
        assert_eq!(numbers, vec!["JE-2025-99999", "JE-2025-100000", "JE-2025-IMPORT"]);
    }

    #[test]
    fn test_line_constructors() {
        let debit = JournalLineRequest::debit("6100", dec!(10), None);
        assert_eq!(debit.debit, dec!(10));
        assert_eq!(debit.credit, Decimal::ZERO);

        let credit = JournalLineRequest::credit("2100", dec!(10), Some("Tax".into()));
        assert_eq!(credit.credit, dec!(10));
        assert_eq!(credit.debit, Decimal::ZERO);
        assert_eq!(credit.description.as_deref(), Some("Tax"));
    }

    #[test]
    fn test_source_type_parse() {
        assert_eq!("payment".parse::<SourceType>().unwrap(), SourceType::Payment);
        assert_eq!(SourceType::Refund.to_string(), "REFUND");
        assert!("INVOICE".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(EntryStatus::Posted.to_string(), "POSTED");
        assert_eq!(EntryStatus::Reversed.as_str(), "REVERSED");
    }
}
