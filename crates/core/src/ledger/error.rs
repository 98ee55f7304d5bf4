//! Ledger error types for validation and state errors.
//!
//! Validation errors are raised before anything is written. State errors are
//! raised when the target entry is missing or already reversed.

use muniledger_shared::types::Money;
use muniledger_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

fn money(amount: &Decimal) -> Money {
    Money::new(*amount)
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry has no lines.
    #[error("Journal entry must have at least one line")]
    EmptyEntry,

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced: debits={}, credits={}", money(.debit), money(.credit))]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// A line carries a negative debit or credit.
    #[error("Line {line_number} on account {account_number} has a negative amount")]
    NegativeAmount {
        /// 1-based line position.
        line_number: u32,
        /// Account the line posts to.
        account_number: String,
    },

    /// A line amount is finer than one cent.
    #[error("Line {line_number} on account {account_number} has sub-cent amount {amount}")]
    SubCentAmount {
        /// 1-based line position.
        line_number: u32,
        /// Account the line posts to.
        account_number: String,
        /// Offending amount.
        amount: Decimal,
    },

    /// Event amount must be strictly positive.
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    /// Account not found in the chart of accounts.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // ========== State Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Journal entry was already reversed.
    #[error("Journal entry {0} is already reversed")]
    AlreadyReversed(Uuid),

    // ========== Infrastructure Errors ==========
    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::SubCentAmount { .. } => "SUB_CENT_AMOUNT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::EmptyEntry
            | Self::UnbalancedEntry { .. }
            | Self::NegativeAmount { .. }
            | Self::SubCentAmount { .. }
            | Self::InvalidAmount(_)
            | Self::AccountNotFound(_) => 400,

            // 404 Not Found
            Self::EntryNotFound(_) => 404,

            // 409 Conflict
            Self::AlreadyReversed(_) => 409,

            // 500 Internal Server Error
            Self::Internal(_) => 500,
        }
    }

    /// Returns true if this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.http_status_code() == 400
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::EntryNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::AlreadyReversed(_) => Self::Conflict(err.to_string()),
            LedgerError::Internal(msg) => Self::Internal(msg),
            _ => Self::Validation(err.to_string()),
        }
    }
}
