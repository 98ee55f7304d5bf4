//! Shared fixtures and property-based tests for the reports module.

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::reconciliation::Reconciler;
use super::statement::StatementBuilder;
use super::trial_balance::TrialBalanceBuilder;
use crate::chart::ChartOfAccounts;
use crate::ledger::types::{EntryStatus, JournalEntry, JournalEntryLine, SourceType};

pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn entry(
    number: &str,
    date: NaiveDate,
    lines: Vec<(&str, Decimal, Decimal)>,
) -> JournalEntry {
    let now = Utc::now();
    JournalEntry {
        entry_id: Uuid::new_v4(),
        entry_number: number.to_string(),
        entry_date: date,
        description: format!("Entry {number}"),
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
        lines: (1u32..)
            .zip(lines)
            .map(|(n, (account, debit, credit))| JournalEntryLine {
                line_id: Uuid::new_v4(),
                account_number: account.to_string(),
                line_number: n,
                debit,
                credit,
                description: Some(format!("Line {n}")),
            })
            .collect(),
    }
}

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn account() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("1000"),
        Just("1001"),
        Just("1201"),
        Just("2100"),
        Just("2200"),
        Just("2400"),
        Just("4100"),
        Just("6100"),
    ]
}

/// Arbitrary entries, balanced or not, spread over 2025.
fn ledger() -> impl Strategy<Value = Vec<JournalEntry>> {
    prop::collection::vec(
        (
            0i64..365,
            prop::collection::vec((account(), amount(), amount()), 1..5),
        ),
        0..12,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (offset, lines))| {
                entry(
                    &format!("JE-2025-{:05}", i + 1),
                    day(2025, 1, 1) + Duration::days(offset),
                    lines,
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Feature: reports, Property: Trial Balance Consistency
    /// BALANCED iff line debits equal line credits over entries dated on or
    /// before the as-of date, and the difference is exact.
    #[test]
    fn prop_trial_balance_matches_raw_line_sums(
        entries in ledger(),
        as_of_offset in 0i64..365,
    ) {
        let as_of = day(2025, 1, 1) + Duration::days(as_of_offset);
        let report = TrialBalanceBuilder::build(
            &ChartOfAccounts::standard(),
            Uuid::nil(),
            Uuid::nil(),
            &entries,
            as_of,
        );

        let lines = entries
            .iter()
            .filter(|e| e.entry_date <= as_of)
            .flat_map(|e| &e.lines);
        let (debits, credits) = lines.fold((Decimal::ZERO, Decimal::ZERO), |(d, c), l| {
            (d + l.debit, c + l.credit)
        });

        prop_assert_eq!(report.total_debits, debits);
        prop_assert_eq!(report.total_credits, credits);
        prop_assert_eq!(report.total_debits - report.total_credits, report.difference);
        prop_assert_eq!(report.is_balanced(), debits == credits);
    }

    /// Feature: reports, Property: Idempotent Reads
    /// Building a statement twice from the same entries yields identical output,
    /// whatever order the entries arrive in.
    #[test]
    fn prop_statement_is_deterministic(entries in ledger()) {
        let generated_on = day(2026, 1, 1);
        let first = StatementBuilder::build(Uuid::nil(), &entries, None, None, generated_on).unwrap();

        let mut reversed = entries.clone();
        reversed.reverse();
        let second = StatementBuilder::build(Uuid::nil(), &reversed, None, None, generated_on).unwrap();

        prop_assert_eq!(first, second);
    }

    /// The statement's ending balance equals the net credit of its liability lines.
    #[test]
    fn prop_statement_ending_balance(entries in ledger()) {
        let statement =
            StatementBuilder::build(Uuid::nil(), &entries, None, None, day(2026, 1, 1)).unwrap();
        let expected: Decimal = entries
            .iter()
            .flat_map(|e| &e.lines)
            .filter(|l| l.account_number.starts_with('2'))
            .map(|l| l.credit - l.debit)
            .sum();
        prop_assert_eq!(statement.ending_balance, expected);
        prop_assert_eq!(
            statement.transactions.last().map_or(Decimal::ZERO, |t| t.running_balance),
            expected
        );
    }

    /// Reconciliation variances are exactly municipality minus filer.
    #[test]
    fn prop_reconciliation_variance(municipality in ledger(), filers in ledger()) {
        let report = Reconciler::reconcile(Uuid::nil(), Uuid::nil(), &municipality, &filers, day(2026, 1, 1));
        prop_assert_eq!(report.ar_variance, report.municipality_ar - report.filer_liabilities);
        prop_assert_eq!(report.cash_variance, report.municipality_cash - report.filer_payments);
        prop_assert_eq!(
            report.is_reconciled(),
            report.ar_variance.is_zero() && report.cash_variance.is_zero()
        );
    }
}
