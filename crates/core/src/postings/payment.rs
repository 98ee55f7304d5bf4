//! Payment postings.

use rust_decimal::Decimal;

use super::{DualPosting, PostingContext, require_positive};
use crate::chart::accounts;
use crate::ledger::error::LedgerError;
use crate::ledger::types::{JournalLineRequest, SourceType};

/// Builds payment postings.
pub struct PaymentPostings;

impl PaymentPostings {
    /// Builds the dual posting for an approved payment.
    ///
    /// Filer: debit tax liability, credit cash.
    /// Municipality: debit cash receipts, credit receivables.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount` is not positive.
    pub fn payment(
        ctx: &PostingContext,
        amount: Decimal,
        label: &str,
    ) -> Result<DualPosting, LedgerError> {
        let amount = require_positive(amount)?;
        let description = format!("Payment received - {label}");

        Ok(DualPosting {
            source_id: ctx.source_id,
            filer_entry: ctx.filer_request(
                SourceType::Payment,
                description.clone(),
                vec![
                    JournalLineRequest::debit(accounts::TAX_LIABILITY, amount, None),
                    JournalLineRequest::credit(accounts::CASH, amount, None),
                ],
            ),
            municipality_entry: ctx.municipality_request(
                SourceType::Payment,
                description,
                vec![
                    JournalLineRequest::debit(accounts::CASH_RECEIPTS, amount, None),
                    JournalLineRequest::credit(accounts::ACCOUNTS_RECEIVABLE, amount, None),
                ],
            ),
        })
    }
}
