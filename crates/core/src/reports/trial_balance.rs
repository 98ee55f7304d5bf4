//! Trial balance aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{AccountBalance, AccountTypeGroup, TrialBalanceReport, TrialBalanceStatus};
use crate::chart::{AccountType, ChartOfAccounts};
use crate::ledger::types::JournalEntry;

/// Aggregates entry lines into per-account debit, credit and net totals.
pub struct TrialBalanceBuilder;

impl TrialBalanceBuilder {
    /// Builds the trial balance of one ledger owner as of a date.
    ///
    /// Every chart account gets a row, with or without activity. Lines on
    /// accounts missing from the chart are still counted, typed by their
    /// leading digit, so the totals always cover every line dated on or
    /// before `as_of`.
    #[must_use]
    pub fn build(
        chart: &ChartOfAccounts,
        tenant_id: Uuid,
        entity_id: Uuid,
        entries: &[JournalEntry],
        as_of: NaiveDate,
    ) -> TrialBalanceReport {
        let mut balances: BTreeMap<String, AccountBalance> = chart
            .accounts()
            .map(|account| {
                (
                    account.account_number.clone(),
                    AccountBalance {
                        account_number: account.account_number.clone(),
                        account_name: account.account_name.clone(),
                        account_type: account.account_type,
                        debit_total: Decimal::ZERO,
                        credit_total: Decimal::ZERO,
                        net_balance: Decimal::ZERO,
                    },
                )
            })
            .collect();

        for entry in entries.iter().filter(|e| e.entry_date <= as_of) {
            for line in &entry.lines {
                let balance = balances
                    .entry(line.account_number.clone())
                    .or_insert_with(|| AccountBalance {
                        account_number: line.account_number.clone(),
                        account_name: format!("Unknown account {}", line.account_number),
                        account_type: AccountType::infer_from_number(&line.account_number),
                        debit_total: Decimal::ZERO,
                        credit_total: Decimal::ZERO,
                        net_balance: Decimal::ZERO,
                    });
                balance.debit_total += line.debit;
                balance.credit_total += line.credit;
            }
        }

        let accounts: Vec<AccountBalance> = balances
            .into_values()
            .map(|mut balance| {
                balance.net_balance = balance
                    .account_type
                    .net_balance(balance.debit_total, balance.credit_total);
                balance
            })
            .collect();

        let total_debits: Decimal = accounts.iter().map(|a| a.debit_total).sum();
        let total_credits: Decimal = accounts.iter().map(|a| a.credit_total).sum();
        let difference = total_debits - total_credits;

        let by_type = AccountType::ALL
            .iter()
            .map(|&account_type| {
                let grouped: Vec<AccountBalance> = accounts
                    .iter()
                    .filter(|a| a.account_type == account_type)
                    .cloned()
                    .collect();
                AccountTypeGroup {
                    account_type,
                    net_balance: grouped.iter().map(|a| a.net_balance).sum(),
                    accounts: grouped,
                }
            })
            .collect();

        TrialBalanceReport {
            tenant_id,
            entity_id,
            as_of,
            accounts,
            by_type,
            total_debits,
            total_credits,
            difference,
            status: if difference.is_zero() {
                TrialBalanceStatus::Balanced
            } else {
                TrialBalanceStatus::Unbalanced
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{day, entry};
    use rust_decimal_macros::dec;

    #[test]
    fn test_assessment_and_payment() {
        let entries = vec![
            entry(
                "JE-2025-00001",
                day(2025, 4, 15),
                vec![("1201", dec!(10000), dec!(0)), ("4100", dec!(0), dec!(10000))],
            ),
            entry(
                "JE-2025-00002",
                day(2025, 5, 1),
                vec![("1001", dec!(10000), dec!(0)), ("1201", dec!(0), dec!(10000))],
            ),
        ];
        let report = TrialBalanceBuilder::build(
            &ChartOfAccounts::standard(),
            Uuid::nil(),
            Uuid::nil(),
            &entries,
            day(2025, 12, 31),
        );

        assert!(report.is_balanced());
        assert_eq!(report.total_debits, dec!(20000));
        assert_eq!(report.total_credits, dec!(20000));
        assert_eq!(report.difference, dec!(0));
        assert_eq!(report.accounts.len(), 14);
        assert_eq!(report.account("1201").unwrap().net_balance, dec!(0));
        assert_eq!(report.account("1001").unwrap().net_balance, dec!(10000));
        assert_eq!(report.account("4100").unwrap().net_balance, dec!(10000));

        let revenue = report
            .by_type
            .iter()
            .find(|g| g.account_type == AccountType::Revenue)
            .unwrap();
        assert_eq!(revenue.net_balance, dec!(10000));
        assert_eq!(revenue.accounts.len(), 3);
    }

    #[test]
    fn test_as_of_excludes_later_entries() {
        let entries = vec![
            entry(
                "JE-2025-00001",
                day(2025, 3, 31),
                vec![("1201", dec!(50), dec!(0)), ("4100", dec!(0), dec!(50))],
            ),
            entry(
                "JE-2025-00002",
                day(2025, 4, 1),
                vec![("1201", dec!(70), dec!(0)), ("4100", dec!(0), dec!(70))],
            ),
        ];
        let report = TrialBalanceBuilder::build(
            &ChartOfAccounts::standard(),
            Uuid::nil(),
            Uuid::nil(),
            &entries,
            day(2025, 3, 31),
        );
        assert_eq!(report.total_debits, dec!(50));
    }

    #[test]
    fn test_unbalanced_is_reported_not_hidden() {
        let entries = vec![entry(
            "JE-2025-00001",
            day(2025, 1, 1),
            vec![("1201", dec!(100), dec!(0)), ("4100", dec!(0), dec!(60))],
        )];
        let report = TrialBalanceBuilder::build(
            &ChartOfAccounts::standard(),
            Uuid::nil(),
            Uuid::nil(),
            &entries,
            day(2025, 1, 1),
        );
        assert_eq!(report.status, TrialBalanceStatus::Unbalanced);
        assert_eq!(report.difference, dec!(40));
    }

    #[test]
    fn test_unknown_account_still_counted() {
        let entries = vec![entry(
            "JE-2025-00001",
            day(2025, 1, 1),
            vec![("1201", dec!(5), dec!(0)), ("4999", dec!(0), dec!(5))],
        )];
        let report = TrialBalanceBuilder::build(
            &ChartOfAccounts::standard(),
            Uuid::nil(),
            Uuid::nil(),
            &entries,
            day(2025, 1, 1),
        );
        assert!(report.is_balanced());
        let unknown = report.account("4999").unwrap();
        assert_eq!(unknown.account_type, AccountType::Revenue);
        assert_eq!(unknown.net_balance, dec!(5));
    }
}
