//! Financial report generation.
//!
//! This module provides pure business logic for the ledger's read side:
//! - Filer account statements with running balances
//! - Trial balance with per-type grouping
//! - Municipality vs filer reconciliation
//! - Reporting period resolution

pub mod error;
pub mod period;
pub mod reconciliation;
pub mod statement;
pub mod trial_balance;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use period::Period;
pub use reconciliation::Reconciler;
pub use statement::{STATEMENT_ACCOUNT_LABEL, StatementBuilder};
pub use trial_balance::TrialBalanceBuilder;
pub use types::*;
