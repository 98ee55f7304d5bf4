//! Property-based tests for entry reversal.
//!
//! Feature: ledger-core, Property: Reversal Symmetry
//! A reversing request swaps every line's sides, stays balanced, and nets
//! the original to zero per account.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::reversal::ReversalService;
use super::types::{EntryStatus, JournalEntry, JournalEntryLine, SourceType};
use super::validation::LedgerValidator;
use crate::chart::ChartOfAccounts;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn account() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("1000"), Just("2100"), Just("2200"), Just("6100"), Just("6200")]
}

/// A balanced entry: debit lines with random amounts, one closing credit line.
fn balanced_entry() -> impl Strategy<Value = JournalEntry> {
    (
        prop::collection::vec((account(), positive_amount()), 1..6),
        account(),
    )
        .prop_map(|(debits, credit_account)| {
            let total: Decimal = debits.iter().map(|(_, a)| *a).sum();
            let mut lines: Vec<(String, Decimal, Decimal)> = debits
                .into_iter()
                .map(|(acct, amount)| (acct.to_string(), amount, Decimal::ZERO))
                .collect();
            lines.push((credit_account.to_string(), Decimal::ZERO, total));

            let now = Utc::now();
            JournalEntry {
                entry_id: Uuid::new_v4(),
                entry_number: "JE-2025-00001".to_string(),
                entry_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default(),
                description: "Assessment".to_string(),
                source_type: SourceType::Assessment,
                source_id: Uuid::new_v4(),
                status: EntryStatus::Posted,
                tenant_id: Uuid::new_v4(),
                entity_id: Uuid::new_v4(),
                created_by: Uuid::new_v4(),
                created_at: now,
                posted_at: now,
                reversed_by: None,
                reversed_at: None,
                reversal_entry_id: None,
                lines: (1u32..)
                    .zip(lines)
                    .map(|(n, (account_number, debit, credit))| JournalEntryLine {
                        line_id: Uuid::new_v4(),
                        account_number,
                        line_number: n,
                        debit,
                        credit,
                        description: None,
                    })
                    .collect(),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_reversal_swaps_every_line(entry in balanced_entry()) {
        let req = ReversalService::build_reversal_request(&entry, Uuid::new_v4(), "duplicate").unwrap();

        prop_assert_eq!(req.lines.len(), entry.lines.len());
        for (original, reversed) in entry.lines.iter().zip(&req.lines) {
            prop_assert_eq!(&original.account_number, &reversed.account_number);
            prop_assert_eq!(original.debit, reversed.credit);
            prop_assert_eq!(original.credit, reversed.debit);
        }
    }

    #[test]
    fn prop_reversal_is_balanced(entry in balanced_entry()) {
        let req = ReversalService::build_reversal_request(&entry, Uuid::new_v4(), "").unwrap();
        let totals = LedgerValidator::validate(&req, &ChartOfAccounts::standard());
        prop_assert!(totals.is_ok(), "reversal rejected: {:?}", totals);
    }

    #[test]
    fn prop_reversal_nets_accounts_to_zero(entry in balanced_entry()) {
        let req = ReversalService::build_reversal_request(&entry, Uuid::new_v4(), "").unwrap();

        let mut net: BTreeMap<&str, Decimal> = BTreeMap::new();
        for line in &entry.lines {
            *net.entry(line.account_number.as_str()).or_default() += line.debit - line.credit;
        }
        for line in &req.lines {
            *net.entry(line.account_number.as_str()).or_default() += line.debit - line.credit;
        }
        prop_assert!(net.values().all(Decimal::is_zero));
    }
}
