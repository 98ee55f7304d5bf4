//! Business rule validation for journal entries.

use muniledger_shared::types::Money;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryTotals, JournalEntry, JournalEntryRequest, JournalLineRequest};
use crate::chart::ChartOfAccounts;

/// Validates journal entry requests before anything is persisted.
///
/// Pure business logic with no database dependencies.
pub struct LedgerValidator;

impl LedgerValidator {
    /// Validates a journal entry request against the chart of accounts.
    ///
    /// Checks run in a fixed order so the first failure is deterministic:
    /// 1. At least one line
    /// 2. No negative debit or credit
    /// 3. No amount finer than one cent
    /// 4. Every account exists
    /// 5. Debits equal credits exactly
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` found.
    pub fn validate(
        request: &JournalEntryRequest,
        chart: &ChartOfAccounts,
    ) -> Result<EntryTotals, LedgerError> {
        if request.lines.is_empty() {
            return Err(LedgerError::EmptyEntry);
        }

        for (line_number, line) in (1u32..).zip(&request.lines) {
            if is_negative(line.debit) || is_negative(line.credit) {
                return Err(LedgerError::NegativeAmount {
                    line_number,
                    account_number: line.account_number.clone(),
                });
            }
            if let Some(amount) = [line.debit, line.credit].into_iter().find(|a| is_sub_cent(*a)) {
                return Err(LedgerError::SubCentAmount {
                    line_number,
                    account_number: line.account_number.clone(),
                    amount,
                });
            }
        }

        if let Some(line) = request
            .lines
            .iter()
            .find(|line| !chart.contains(&line.account_number))
        {
            return Err(LedgerError::AccountNotFound(line.account_number.clone()));
        }

        let totals = Self::calculate_totals(&request.lines);
        if !totals.is_balanced {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }

        Ok(totals)
    }

    /// Sums debits and credits across requested lines.
    #[must_use]
    pub fn calculate_totals(lines: &[JournalLineRequest]) -> EntryTotals {
        let (debit, credit) = lines
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), line| {
                (d + line.debit, c + line.credit)
            });
        EntryTotals::new(debit, credit)
    }

    /// Checks that an entry can still be reversed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyReversed` if the entry is already reversed.
    pub fn validate_can_reverse(entry: &JournalEntry) -> Result<(), LedgerError> {
        if entry.is_reversed() {
            return Err(LedgerError::AlreadyReversed(entry.entry_id));
        }
        Ok(())
    }
}

fn is_negative(amount: Decimal) -> bool {
    amount.is_sign_negative() && !amount.is_zero()
}

fn is_sub_cent(amount: Decimal) -> bool {
    Money::normalize(amount) != amount
}
