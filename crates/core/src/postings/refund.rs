//! Refund postings.
//!
//! A refund is posted twice: once when requested, as symmetric receivable
//! and payable entries, and once when issued, converting those into cash.
//! The overpayment backing a request is validated by the caller.

use rust_decimal::Decimal;

use super::{DualPosting, PostingContext, require_positive};
use crate::chart::accounts;
use crate::ledger::error::LedgerError;
use crate::ledger::types::{JournalLineRequest, SourceType};

/// Builds refund postings.
pub struct RefundPostings;

impl RefundPostings {
    /// Builds the dual posting for a refund request.
    ///
    /// Filer: debit refund receivable, credit tax liability.
    /// Municipality: debit receivables, credit refunds payable.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount` is not positive.
    pub fn request(
        ctx: &PostingContext,
        amount: Decimal,
        label: &str,
    ) -> Result<DualPosting, LedgerError> {
        let amount = require_positive(amount)?;
        Ok(Self::pair(
            ctx,
            format!("Refund requested - {label}"),
            (accounts::REFUND_RECEIVABLE, accounts::TAX_LIABILITY),
            (accounts::ACCOUNTS_RECEIVABLE, accounts::REFUNDS_PAYABLE),
            amount,
        ))
    }

    /// Builds the dual posting for a refund payout.
    ///
    /// Filer: debit cash, credit refund receivable.
    /// Municipality: debit refunds payable, credit cash receipts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount` is not positive.
    pub fn issuance(
        ctx: &PostingContext,
        amount: Decimal,
        label: &str,
    ) -> Result<DualPosting, LedgerError> {
        let amount = require_positive(amount)?;
        Ok(Self::pair(
            ctx,
            format!("Refund issued - {label}"),
            (accounts::CASH, accounts::REFUND_RECEIVABLE),
            (accounts::REFUNDS_PAYABLE, accounts::CASH_RECEIPTS),
            amount,
        ))
    }

    fn pair(
        ctx: &PostingContext,
        description: String,
        (filer_debit, filer_credit): (&str, &str),
        (municipality_debit, municipality_credit): (&str, &str),
        amount: Decimal,
    ) -> DualPosting {
        DualPosting {
            source_id: ctx.source_id,
            filer_entry: ctx.filer_request(
                SourceType::Refund,
                description.clone(),
                vec![
                    JournalLineRequest::debit(filer_debit, amount, None),
                    JournalLineRequest::credit(filer_credit, amount, None),
                ],
            ),
            municipality_entry: ctx.municipality_request(
                SourceType::Refund,
                description,
                vec![
                    JournalLineRequest::debit(municipality_debit, amount, None),
                    JournalLineRequest::credit(municipality_credit, amount, None),
                ],
            ),
        }
    }
}
