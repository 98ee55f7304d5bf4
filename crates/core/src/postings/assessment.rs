//! Tax assessment postings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DualPosting, PostingContext};
use crate::chart::accounts;
use crate::ledger::error::LedgerError;
use crate::ledger::types::{JournalLineRequest, SourceType};

/// Already-computed assessment components. The ledger never recomputes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentAmounts {
    /// Tax due.
    pub tax: Decimal,
    /// Penalty due.
    pub penalty: Decimal,
    /// Interest due.
    pub interest: Decimal,
}

impl AssessmentAmounts {
    /// Creates the components.
    #[must_use]
    pub const fn new(tax: Decimal, penalty: Decimal, interest: Decimal) -> Self {
        Self {
            tax,
            penalty,
            interest,
        }
    }

    /// Tax only.
    #[must_use]
    pub const fn tax_only(tax: Decimal) -> Self {
        Self::new(tax, Decimal::ZERO, Decimal::ZERO)
    }

    /// Sum of all components.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.tax + self.penalty + self.interest
    }
}

/// Builds assessment postings.
pub struct TaxAssessmentPostings;

impl TaxAssessmentPostings {
    /// Builds the dual posting for an assessment.
    ///
    /// Filer side: debit expense, credit liability, per non-zero component.
    /// Municipality side: debit receivables for the total, credit revenue per
    /// non-zero component.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if a component is negative or the
    /// total is not positive.
    pub fn assessment(
        ctx: &PostingContext,
        amounts: AssessmentAmounts,
        label: &str,
    ) -> Result<DualPosting, LedgerError> {
        for component in [amounts.tax, amounts.penalty, amounts.interest] {
            if component < Decimal::ZERO {
                return Err(LedgerError::InvalidAmount(component));
            }
        }
        let total = super::require_positive(amounts.total())?;

        let components = [
            (
                amounts.tax,
                "Tax",
                accounts::TAX_EXPENSE,
                accounts::TAX_LIABILITY,
                accounts::TAX_REVENUE,
            ),
            (
                amounts.penalty,
                "Penalty",
                accounts::PENALTY_EXPENSE,
                accounts::PENALTY_LIABILITY,
                accounts::PENALTY_REVENUE,
            ),
            (
                amounts.interest,
                "Interest",
                accounts::INTEREST_EXPENSE,
                accounts::INTEREST_LIABILITY,
                accounts::INTEREST_REVENUE,
            ),
        ];
        let charged = components.iter().filter(|(amount, ..)| !amount.is_zero());

        let mut filer_debits = Vec::new();
        let mut filer_credits = Vec::new();
        let mut municipality_lines = vec![JournalLineRequest::debit(
            accounts::ACCOUNTS_RECEIVABLE,
            total,
            Some(format!("Assessment receivable - {label}")),
        )];

        for &(amount, kind, expense, liability, revenue) in charged {
            let description = Some(format!("{kind} assessed - {label}"));
            filer_debits.push(JournalLineRequest::debit(expense, amount, description.clone()));
            filer_credits.push(JournalLineRequest::credit(liability, amount, description.clone()));
            municipality_lines.push(JournalLineRequest::credit(revenue, amount, description));
        }
        filer_debits.extend(filer_credits);

        let description = format!("Tax assessment - {label}");
        Ok(DualPosting {
            source_id: ctx.source_id,
            filer_entry: ctx.filer_request(SourceType::Assessment, description.clone(), filer_debits),
            municipality_entry: ctx.municipality_request(
                SourceType::Assessment,
                description,
                municipality_lines,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::fixtures::context;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tax_only_assessment() {
        let posting =
            TaxAssessmentPostings::assessment(&context(), AssessmentAmounts::tax_only(dec!(10000)), "2024 return")
                .unwrap();

        let filer = &posting.filer_entry.lines;
        assert_eq!(filer.len(), 2);
        assert_eq!(filer[0].account_number, "6100");
        assert_eq!(filer[0].debit, dec!(10000));
        assert_eq!(filer[1].account_number, "2100");
        assert_eq!(filer[1].credit, dec!(10000));

        let municipality = &posting.municipality_entry.lines;
        assert_eq!(municipality.len(), 2);
        assert_eq!(municipality[0].account_number, "1201");
        assert_eq!(municipality[0].debit, dec!(10000));
        assert_eq!(municipality[1].account_number, "4100");
        assert_eq!(municipality[1].credit, dec!(10000));

        assert_eq!(posting.filer_entry.source_type, SourceType::Assessment);
        assert_eq!(posting.filer_entry.description, "Tax assessment - 2024 return");
    }

    #[test]
    fn test_full_assessment_components() {
        let posting = TaxAssessmentPostings::assessment(
            &context(),
            AssessmentAmounts::new(dec!(1000), dec!(50), dec!(12.34)),
            "Q2",
        )
        .unwrap();

        let filer_accounts: Vec<&str> = posting
            .filer_entry
            .lines
            .iter()
            .map(|l| l.account_number.as_str())
            .collect();
        assert_eq!(filer_accounts, vec!["6100", "6200", "6300", "2100", "2200", "2300"]);

        let municipality = &posting.municipality_entry.lines;
        assert_eq!(municipality[0].debit, dec!(1062.34));
        let revenue: Vec<&str> = municipality[1..].iter().map(|l| l.account_number.as_str()).collect();
        assert_eq!(revenue, vec!["4100", "4200", "4300"]);
    }

    #[test]
    fn test_rejects_zero_total_and_negative_component() {
        assert!(matches!(
            TaxAssessmentPostings::assessment(&context(), AssessmentAmounts::default(), "none"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            TaxAssessmentPostings::assessment(
                &context(),
                AssessmentAmounts::new(dec!(100), dec!(-5), dec!(0)),
                "bad"
            ),
            Err(LedgerError::InvalidAmount(a)) if a == dec!(-5)
        ));
    }
}
