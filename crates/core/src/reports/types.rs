//! Report data types.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chart::AccountType;
use crate::ledger::types::SourceType;

/// One statement row: a liability or cash line with the balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTransaction {
    /// Date of the owning entry.
    pub entry_date: NaiveDate,
    /// Number of the owning entry.
    pub entry_number: String,
    /// Business event type of the owning entry.
    pub source_type: SourceType,
    /// Line description, or the entry description when the line has none.
    pub description: String,
    /// Account the line posts to.
    pub account_number: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this line.
    pub running_balance: Decimal,
}

/// Running-balance statement for one filer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatement {
    /// Filer entity.
    pub entity_id: Uuid,
    /// Account name label.
    pub account_name: String,
    /// Generation date.
    pub generated_on: NaiveDate,
    /// Inclusive lower date bound, unbounded when absent.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound, unbounded when absent.
    pub end_date: Option<NaiveDate>,
    /// Balance before the first row. Always zero.
    pub beginning_balance: Decimal,
    /// Running balance after the last row.
    pub ending_balance: Decimal,
    /// Sum of debits across included rows.
    pub total_debits: Decimal,
    /// Sum of credits across included rows.
    pub total_credits: Decimal,
    /// Rows in entry date order, then line order.
    pub transactions: Vec<StatementTransaction>,
}

/// Account balance for the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
    /// Net balance in the account's normal direction.
    pub net_balance: Decimal,
}

/// Whether the trial balance totals agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrialBalanceStatus {
    /// Total debits equal total credits.
    Balanced,
    /// Totals differ; the difference is a data-integrity signal.
    Unbalanced,
}

impl fmt::Display for TrialBalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Balanced => "BALANCED",
            Self::Unbalanced => "UNBALANCED",
        })
    }
}

/// Accounts of one type with their summed net balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTypeGroup {
    /// Account type.
    pub account_type: AccountType,
    /// Sum of net balances.
    pub net_balance: Decimal,
    /// Accounts in number order.
    pub accounts: Vec<AccountBalance>,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Tenant.
    pub tenant_id: Uuid,
    /// Ledger owner the report covers.
    pub entity_id: Uuid,
    /// Inclusive as-of date.
    pub as_of: NaiveDate,
    /// Every account with activity or in the chart, in number order.
    pub accounts: Vec<AccountBalance>,
    /// Accounts grouped by type in reporting order.
    pub by_type: Vec<AccountTypeGroup>,
    /// Sum of all debit totals.
    pub total_debits: Decimal,
    /// Sum of all credit totals.
    pub total_credits: Decimal,
    /// `total_debits - total_credits`.
    pub difference: Decimal,
    /// Balanced iff the difference is zero.
    pub status: TrialBalanceStatus,
}

impl TrialBalanceReport {
    /// Returns true when debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.status == TrialBalanceStatus::Balanced
    }

    /// Looks up one account's balance.
    #[must_use]
    pub fn account(&self, account_number: &str) -> Option<&AccountBalance> {
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number)
    }
}

/// Whether the two sub-ledgers agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconciliationStatus {
    /// Both variances are zero.
    Reconciled,
    /// At least one variance is non-zero.
    Discrepancy,
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reconciled => "RECONCILED",
            Self::Discrepancy => "DISCREPANCY",
        })
    }
}

/// Account pair compared by the reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconciliationCategory {
    /// Municipality receivable vs filer liabilities.
    AccountsReceivable,
    /// Municipality cash receipts vs filer cash paid.
    Cash,
}

impl fmt::Display for ReconciliationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AccountsReceivable => "ACCOUNTS_RECEIVABLE",
            Self::Cash => "CASH",
        })
    }
}

/// One non-zero variance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Compared account pair.
    pub category: ReconciliationCategory,
    /// Municipality-side balance.
    pub municipality_amount: Decimal,
    /// Filer-side aggregate.
    pub filer_amount: Decimal,
    /// `municipality_amount - filer_amount`.
    pub variance: Decimal,
    /// Human-readable explanation.
    pub description: String,
}

/// Cross-ledger reconciliation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Tenant.
    pub tenant_id: Uuid,
    /// Municipality entity.
    pub municipality_id: Uuid,
    /// Generation date.
    pub generated_on: NaiveDate,
    /// Municipality accounts receivable (1201, debit - credit).
    pub municipality_ar: Decimal,
    /// Filer liabilities (2xxx, credit - debit) across all filers.
    pub filer_liabilities: Decimal,
    /// `municipality_ar - filer_liabilities`.
    pub ar_variance: Decimal,
    /// Municipality cash receipts (1001, debit - credit).
    pub municipality_cash: Decimal,
    /// Filer cash paid out (1000, credit - debit) across all filers.
    pub filer_payments: Decimal,
    /// `municipality_cash - filer_payments`.
    pub cash_variance: Decimal,
    /// Reconciled iff both variances are zero.
    pub status: ReconciliationStatus,
    /// One row per non-zero variance.
    pub discrepancies: Vec<Discrepancy>,
}

impl ReconciliationReport {
    /// Returns true when both sub-ledgers agree.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        self.status == ReconciliationStatus::Reconciled
    }
}
