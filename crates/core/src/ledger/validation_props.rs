//! Property-based tests for journal entry validation.
//!
//! Feature: ledger-core, Property: Balance Invariant
//! Any accepted entry has equal debit and credit sums; any entry with
//! unequal sums is rejected with both totals reported.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{JournalEntryRequest, JournalLineRequest, SourceType};
use super::validation::LedgerValidator;
use crate::chart::{ChartOfAccounts, accounts};

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to pick an account from the standard chart.
fn known_account() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(accounts::CASH),
        Just(accounts::TAX_LIABILITY),
        Just(accounts::TAX_EXPENSE),
        Just(accounts::ACCOUNTS_RECEIVABLE),
        Just(accounts::TAX_REVENUE),
    ]
}

fn make_request(lines: Vec<JournalLineRequest>) -> JournalEntryRequest {
    JournalEntryRequest {
        tenant_id: Uuid::nil(),
        entity_id: Uuid::nil(),
        entry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        description: "prop".to_string(),
        source_type: SourceType::Adjustment,
        source_id: Uuid::nil(),
        created_by: Uuid::nil(),
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Debits split across several lines balance a single credit of their sum.
    #[test]
    fn prop_split_debits_balance_single_credit(
        amounts in prop::collection::vec(positive_amount(), 1..8),
        debit_account in known_account(),
        credit_account in known_account(),
    ) {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<JournalLineRequest> = amounts
            .iter()
            .map(|a| JournalLineRequest::debit(debit_account, *a, None))
            .collect();
        lines.push(JournalLineRequest::credit(credit_account, total, None));

        let totals = LedgerValidator::validate(&make_request(lines), &ChartOfAccounts::standard());
        prop_assert!(totals.is_ok(), "balanced entry rejected: {:?}", totals);
        let totals = totals.unwrap();
        prop_assert_eq!(totals.total_debit, total);
        prop_assert_eq!(totals.total_credit, total);
    }

    /// Any non-zero skew between the sides is rejected with both totals.
    #[test]
    fn prop_skewed_entry_rejected(
        amount in positive_amount(),
        skew in positive_amount(),
        debit_heavy in any::<bool>(),
    ) {
        let (debit, credit) = if debit_heavy { (amount + skew, amount) } else { (amount, amount + skew) };
        let lines = vec![
            JournalLineRequest::debit(accounts::TAX_LIABILITY, debit, None),
            JournalLineRequest::credit(accounts::CASH, credit, None),
        ];

        let result = LedgerValidator::validate(&make_request(lines), &ChartOfAccounts::standard());
        match result {
            Err(LedgerError::UnbalancedEntry { debit: d, credit: c }) => {
                prop_assert_eq!(d, debit);
                prop_assert_eq!(c, credit);
            }
            other => prop_assert!(false, "expected UnbalancedEntry, got {:?}", other),
        }
    }

    /// Accounts outside the chart are always rejected, even when balanced.
    #[test]
    fn prop_unknown_account_rejected(
        amount in positive_amount(),
        number in 7000u32..9999,
    ) {
        let unknown = number.to_string();
        let lines = vec![
            JournalLineRequest::debit(&unknown, amount, None),
            JournalLineRequest::credit(accounts::CASH, amount, None),
        ];

        let result = LedgerValidator::validate(&make_request(lines), &ChartOfAccounts::standard());
        prop_assert!(
            matches!(result, Err(LedgerError::AccountNotFound(ref n)) if *n == unknown),
            "unknown account accepted: {:?}",
            result
        );
    }

    /// Amounts with fractions of a cent are rejected even when both sides match.
    #[test]
    fn prop_sub_cent_amount_rejected(
        mills in 1i64..100_000_000i64,
    ) {
        prop_assume!(mills % 10 != 0);
        let amount = Decimal::new(mills, 3);
        let lines = vec![
            JournalLineRequest::debit(accounts::TAX_EXPENSE, amount, None),
            JournalLineRequest::credit(accounts::TAX_LIABILITY, amount, None),
        ];

        let result = LedgerValidator::validate(&make_request(lines), &ChartOfAccounts::standard());
        prop_assert!(
            matches!(result, Err(LedgerError::SubCentAmount { line_number: 1, .. })),
            "sub-cent entry accepted: {:?}",
            result
        );
    }
}
