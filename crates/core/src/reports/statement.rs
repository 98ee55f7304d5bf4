//! Filer account statements.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::ReportError;
use super::types::{AccountStatement, StatementTransaction};
use crate::chart::{is_cash_account, is_liability_account};
use crate::ledger::types::JournalEntry;

/// Account name label printed on filer statements.
pub const STATEMENT_ACCOUNT_LABEL: &str = "Tax Liability and Payments";

/// Projects a filer's liability and cash lines into a running-balance statement.
pub struct StatementBuilder;

impl StatementBuilder {
    /// Builds a statement from a filer's entries.
    ///
    /// Entries are processed in ledger order (date, then numeric sequence) and
    /// lines in line order, regardless of input order. Only liability lines
    /// (prefix "2") and filer cash lines ("1000") are included. The running
    /// balance moves by `credit - debit` on liability lines; cash lines are
    /// listed without moving it.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `start` is after `end`.
    pub fn build(
        entity_id: Uuid,
        entries: &[JournalEntry],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        generated_on: NaiveDate,
    ) -> Result<AccountStatement, ReportError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ReportError::InvalidDateRange { start, end });
            }
        }

        let mut ordered: Vec<&JournalEntry> = entries
            .iter()
            .filter(|e| start.is_none_or(|s| e.entry_date >= s))
            .filter(|e| end.is_none_or(|d| e.entry_date <= d))
            .collect();
        ordered.sort_by(|a, b| a.ledger_order_key().cmp(&b.ledger_order_key()));

        let mut running_balance = Decimal::ZERO;
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;
        let mut transactions = Vec::new();

        for entry in ordered {
            let mut lines: Vec<_> = entry.lines.iter().collect();
            lines.sort_by_key(|l| l.line_number);

            for line in lines {
                let liability = is_liability_account(&line.account_number);
                if !liability && !is_cash_account(&line.account_number) {
                    continue;
                }

                if liability {
                    running_balance += line.credit - line.debit;
                }
                total_debits += line.debit;
                total_credits += line.credit;

                transactions.push(StatementTransaction {
                    entry_date: entry.entry_date,
                    entry_number: entry.entry_number.clone(),
                    source_type: entry.source_type,
                    description: line
                        .description
                        .clone()
                        .unwrap_or_else(|| entry.description.clone()),
                    account_number: line.account_number.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    running_balance,
                });
            }
        }

        Ok(AccountStatement {
            entity_id,
            account_name: STATEMENT_ACCOUNT_LABEL.to_string(),
            generated_on,
            start_date: start,
            end_date: end,
            beginning_balance: Decimal::ZERO,
            ending_balance: running_balance,
            total_debits,
            total_credits,
            transactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{day, entry};
    use rust_decimal_macros::dec;

    #[test]
    fn test_assessment_then_payment() {
        let entries = vec![
            entry(
                "JE-2025-00002",
                day(2025, 5, 1),
                vec![("2100", dec!(10000), dec!(0)), ("1000", dec!(0), dec!(10000))],
            ),
            entry(
                "JE-2025-00001",
                day(2025, 4, 15),
                vec![("6100", dec!(10000), dec!(0)), ("2100", dec!(0), dec!(10000))],
            ),
        ];

        let statement =
            StatementBuilder::build(Uuid::nil(), &entries, None, None, day(2025, 6, 1)).unwrap();

        let balances: Vec<Decimal> = statement
            .transactions
            .iter()
            .map(|t| t.running_balance)
            .collect();
        assert_eq!(balances, vec![dec!(10000), dec!(0), dec!(0)]);
        assert_eq!(statement.transactions[0].entry_number, "JE-2025-00001");
        assert_eq!(statement.ending_balance, dec!(0));
        assert_eq!(statement.beginning_balance, dec!(0));
        assert_eq!(statement.total_debits, dec!(10000));
        assert_eq!(statement.total_credits, dec!(20000));
    }

    #[test]
    fn test_same_day_entries_follow_numeric_sequence() {
        let entries = vec![
            entry(
                "JE-2025-100000",
                day(2025, 5, 1),
                vec![("2100", dec!(40), dec!(0)), ("1000", dec!(0), dec!(40))],
            ),
            entry(
                "JE-2025-99999",
                day(2025, 5, 1),
                vec![("6100", dec!(100), dec!(0)), ("2100", dec!(0), dec!(100))],
            ),
        ];

        let statement =
            StatementBuilder::build(Uuid::nil(), &entries, None, None, day(2025, 6, 1)).unwrap();

        let order: Vec<&str> = statement
            .transactions
            .iter()
            .map(|t| t.entry_number.as_str())
            .collect();
        assert_eq!(order, vec!["JE-2025-99999", "JE-2025-100000", "JE-2025-100000"]);
        assert_eq!(statement.transactions[0].running_balance, dec!(100));
        assert_eq!(statement.ending_balance, dec!(60));
    }

    #[test]
    fn test_expense_and_municipality_accounts_excluded() {
        let entries = vec![entry(
            "JE-2025-00001",
            day(2025, 4, 15),
            vec![
                ("6100", dec!(100), dec!(0)),
                ("1201", dec!(100), dec!(0)),
                ("2100", dec!(0), dec!(200)),
            ],
        )];
        let statement =
            StatementBuilder::build(Uuid::nil(), &entries, None, None, day(2025, 6, 1)).unwrap();
        assert_eq!(statement.transactions.len(), 1);
        assert_eq!(statement.transactions[0].account_number, "2100");
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let entries = vec![
            entry("JE-2025-00001", day(2025, 1, 10), vec![("2100", dec!(0), dec!(1))]),
            entry("JE-2025-00002", day(2025, 2, 10), vec![("2100", dec!(0), dec!(2))]),
            entry("JE-2025-00003", day(2025, 3, 10), vec![("2100", dec!(0), dec!(4))]),
        ];
        let statement = StatementBuilder::build(
            Uuid::nil(),
            &entries,
            Some(day(2025, 2, 10)),
            Some(day(2025, 3, 10)),
            day(2025, 6, 1),
        )
        .unwrap();
        assert_eq!(statement.transactions.len(), 2);
        assert_eq!(statement.ending_balance, dec!(6));
    }

    #[test]
    fn test_line_description_falls_back_to_entry() {
        let mut e = entry("JE-2025-00001", day(2025, 1, 10), vec![("2100", dec!(0), dec!(1))]);
        e.lines[0].description = None;
        let statement =
            StatementBuilder::build(Uuid::nil(), &[e.clone()], None, None, day(2025, 6, 1)).unwrap();
        assert_eq!(statement.transactions[0].description, e.description);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = StatementBuilder::build(
            Uuid::nil(),
            &[],
            Some(day(2025, 2, 1)),
            Some(day(2025, 1, 1)),
            day(2025, 6, 1),
        );
        assert!(matches!(result, Err(ReportError::InvalidDateRange { .. })));
    }
}
