//! Domain posting generators.
//!
//! Each business event touching a filer and the municipality becomes a
//! [`DualPosting`]: two balanced entry requests sharing one `source_id`,
//! one per sub-ledger. Persisting both in one transaction is the caller's job.

mod assessment;
mod payment;
mod refund;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::municipality_entity_id;
use crate::ledger::error::LedgerError;
use crate::ledger::types::{JournalEntryRequest, JournalLineRequest, SourceType};

pub use assessment::{AssessmentAmounts, TaxAssessmentPostings};
pub use payment::PaymentPostings;
pub use refund::RefundPostings;

/// Who, when and for which event a pair of entries is posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingContext {
    /// Tenant.
    pub tenant_id: Uuid,
    /// Filer sub-ledger owner.
    pub filer_id: Uuid,
    /// Municipality sub-ledger owner.
    pub municipality_id: Uuid,
    /// Business event id shared by both entries.
    pub source_id: Uuid,
    /// Accounting date of both entries.
    pub entry_date: NaiveDate,
    /// Acting user.
    pub created_by: Uuid,
}

impl PostingContext {
    /// Creates a context with the tenant's default municipality pseudo-entity.
    #[must_use]
    pub fn new(
        tenant_id: Uuid,
        filer_id: Uuid,
        source_id: Uuid,
        entry_date: NaiveDate,
        created_by: Uuid,
    ) -> Self {
        Self {
            tenant_id,
            filer_id,
            municipality_id: municipality_entity_id(tenant_id),
            source_id,
            entry_date,
            created_by,
        }
    }

    /// Overrides the municipality entity, e.g. one derived with a configured prefix.
    #[must_use]
    pub fn with_municipality(mut self, municipality_id: Uuid) -> Self {
        self.municipality_id = municipality_id;
        self
    }

    fn filer_request(
        &self,
        source_type: SourceType,
        description: String,
        lines: Vec<JournalLineRequest>,
    ) -> JournalEntryRequest {
        self.request(self.filer_id, source_type, description, lines)
    }

    fn municipality_request(
        &self,
        source_type: SourceType,
        description: String,
        lines: Vec<JournalLineRequest>,
    ) -> JournalEntryRequest {
        self.request(self.municipality_id, source_type, description, lines)
    }

    fn request(
        &self,
        entity_id: Uuid,
        source_type: SourceType,
        description: String,
        lines: Vec<JournalLineRequest>,
    ) -> JournalEntryRequest {
        JournalEntryRequest {
            tenant_id: self.tenant_id,
            entity_id,
            entry_date: self.entry_date,
            description,
            source_type,
            source_id: self.source_id,
            created_by: self.created_by,
            lines,
        }
    }
}

/// The filer-side and municipality-side entries of one business event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualPosting {
    /// Shared business event id.
    pub source_id: Uuid,
    /// Entry for the filer sub-ledger.
    pub filer_entry: JournalEntryRequest,
    /// Mirrored entry for the municipality sub-ledger.
    pub municipality_entry: JournalEntryRequest,
}

fn require_positive(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartOfAccounts;
    use crate::ledger::validation::LedgerValidator;
    use rust_decimal_macros::dec;

    #[test]
    fn test_context_derives_municipality() {
        let ctx = fixtures::context();
        assert_eq!(ctx.municipality_id, municipality_entity_id(ctx.tenant_id));
        let other = Uuid::new_v4();
        assert_eq!(ctx.with_municipality(other).municipality_id, other);
    }

    #[test]
    fn test_every_generator_is_balanced_on_both_sides() {
        let chart = ChartOfAccounts::standard();
        let ctx = fixtures::context();
        let postings = [
            TaxAssessmentPostings::assessment(
                &ctx,
                AssessmentAmounts::new(dec!(100), dec!(10), dec!(1.50)),
                "Q1 2025",
            )
            .unwrap(),
            PaymentPostings::payment(&ctx, dec!(50), "Card payment").unwrap(),
            RefundPostings::request(&ctx, dec!(20), "Overpayment").unwrap(),
            RefundPostings::issuance(&ctx, dec!(20), "Overpayment").unwrap(),
        ];

        for posting in &postings {
            assert_eq!(posting.source_id, ctx.source_id);
            assert_eq!(posting.filer_entry.entity_id, ctx.filer_id);
            assert_eq!(posting.municipality_entry.entity_id, ctx.municipality_id);
            assert_eq!(posting.filer_entry.source_id, posting.municipality_entry.source_id);
            assert!(LedgerValidator::validate(&posting.filer_entry, &chart).is_ok());
            assert!(LedgerValidator::validate(&posting.municipality_entry, &chart).is_ok());
        }
    }
}
