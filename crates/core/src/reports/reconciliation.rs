//! Cross-ledger reconciliation between the municipality and its filers.
//!
//! Two account pairs are compared:
//! - receivables: municipality 1201 (debit - credit) vs filer liabilities 2xxx (credit - debit)
//! - cash: municipality 1001 (debit - credit) vs filer cash 1000 (credit - debit)
//!
//! The filer side is the aggregate over every filer entity of the tenant.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    Discrepancy, ReconciliationCategory, ReconciliationReport, ReconciliationStatus,
};
use crate::chart::{accounts, is_cash_account, is_liability_account};
use crate::ledger::types::JournalEntry;

/// Compares the municipality sub-ledger to the aggregate filer sub-ledgers.
pub struct Reconciler;

impl Reconciler {
    /// Builds a reconciliation report.
    ///
    /// `municipality_entries` must belong to the municipality entity and
    /// `filer_entries` to the tenant's filers.
    #[must_use]
    pub fn reconcile(
        tenant_id: Uuid,
        municipality_id: Uuid,
        municipality_entries: &[JournalEntry],
        filer_entries: &[JournalEntry],
        generated_on: NaiveDate,
    ) -> ReconciliationReport {
        let municipality_ar = sum_lines(municipality_entries, |n| n == accounts::ACCOUNTS_RECEIVABLE, Side::Debit);
        let municipality_cash = sum_lines(municipality_entries, |n| n == accounts::CASH_RECEIPTS, Side::Debit);
        let filer_liabilities = sum_lines(filer_entries, is_liability_account, Side::Credit);
        let filer_payments = sum_lines(filer_entries, is_cash_account, Side::Credit);

        let ar_variance = municipality_ar - filer_liabilities;
        let cash_variance = municipality_cash - filer_payments;

        let discrepancies: Vec<Discrepancy> = [
            (
                ReconciliationCategory::AccountsReceivable,
                municipality_ar,
                filer_liabilities,
                ar_variance,
            ),
            (
                ReconciliationCategory::Cash,
                municipality_cash,
                filer_payments,
                cash_variance,
            ),
        ]
        .into_iter()
        .filter(|(_, _, _, variance)| !variance.is_zero())
        .map(|(category, municipality_amount, filer_amount, variance)| Discrepancy {
            category,
            municipality_amount,
            filer_amount,
            variance,
            description: describe(category, municipality_amount, filer_amount, variance),
        })
        .collect();

        ReconciliationReport {
            tenant_id,
            municipality_id,
            generated_on,
            municipality_ar,
            filer_liabilities,
            ar_variance,
            municipality_cash,
            filer_payments,
            cash_variance,
            status: if discrepancies.is_empty() {
                ReconciliationStatus::Reconciled
            } else {
                ReconciliationStatus::Discrepancy
            },
            discrepancies,
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    /// debit - credit
    Debit,
    /// credit - debit
    Credit,
}

fn sum_lines(entries: &[JournalEntry], matches: impl Fn(&str) -> bool, side: Side) -> Decimal {
    entries
        .iter()
        .flat_map(|e| &e.lines)
        .filter(|l| matches(&l.account_number))
        .map(|l| match side {
            Side::Debit => l.debit - l.credit,
            Side::Credit => l.credit - l.debit,
        })
        .sum()
}

fn describe(
    category: ReconciliationCategory,
    municipality_amount: Decimal,
    filer_amount: Decimal,
    variance: Decimal,
) -> String {
    let (municipality_label, filer_label) = match category {
        ReconciliationCategory::AccountsReceivable => {
            ("Municipality accounts receivable", "filer tax liabilities")
        }
        ReconciliationCategory::Cash => ("Municipality cash receipts", "filer payments"),
    };
    let direction = if variance.is_sign_positive() { "exceeds" } else { "falls short of" };
    format!(
        "{municipality_label} ({municipality_amount}) {direction} {filer_label} ({filer_amount}) by {}",
        variance.abs()
    )
}
