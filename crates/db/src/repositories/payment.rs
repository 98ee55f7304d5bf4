//! Payment repository: provider authorization, payment records and postings.

use chrono::{DateTime, NaiveDate, Utc};
use muniledger_core::audit::AuditLogInput;
use muniledger_core::entity::municipality_entity_id_with;
use muniledger_core::payment::{
    PaymentAuthorization, PaymentCredentials, PaymentMethod, PaymentProvider, PaymentStatus,
};
use muniledger_core::postings::{PaymentPostings, PostingContext};
use muniledger_shared::types::Money;
use muniledger_shared::{AppError, LedgerConfig};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit_log::AuditLogRepository;
use super::journal_entry::{JournalEntryError, JournalEntryRepository};
use super::posting::{PostedPair, post_pair_in};
use crate::entities::payment_transactions;

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    /// Posting the approved payment failed.
    #[error(transparent)]
    Posting(#[from] JournalEntryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PaymentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PAYMENT_NOT_FOUND",
            Self::Posting(err) => err.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Posting(err) => err.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotFound(_) => Self::NotFound(err.to_string()),
            PaymentError::Posting(err) => err.into(),
            PaymentError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Input for processing a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Tenant.
    pub tenant_id: Uuid,
    /// Paying filer.
    pub filer_id: Uuid,
    /// Assessment or return being paid.
    pub source_id: Uuid,
    /// Amount to charge.
    pub amount: Decimal,
    /// Method-specific credentials.
    pub credentials: PaymentCredentials,
    /// Accounting date for the postings.
    pub entry_date: NaiveDate,
    /// Acting user.
    pub created_by: Uuid,
}

/// A persisted payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment id, also the source id of its journal entries.
    pub payment_id: Uuid,
    /// Tenant.
    pub tenant_id: Uuid,
    /// Paying filer.
    pub filer_id: Uuid,
    /// Assessment or return being paid.
    pub source_id: Uuid,
    /// Charged amount.
    pub amount: Decimal,
    /// Method.
    pub payment_method: PaymentMethod,
    /// Provider outcome.
    pub status: PaymentStatus,
    /// Provider-side transaction id.
    pub provider_transaction_id: Option<String>,
    /// Authorization code on approval.
    pub authorization_code: Option<String>,
    /// Reason on decline or error.
    pub failure_reason: Option<String>,
    /// Filer-side entry, when posted.
    pub journal_entry_id: Option<Uuid>,
    /// Municipality-side entry, when posted.
    pub municipality_entry_id: Option<Uuid>,
    /// Acting user.
    pub created_by: Uuid,
    /// Record time.
    pub created_at: DateTime<Utc>,
}

/// Result of processing a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    /// The persisted attempt.
    pub payment: PaymentRecord,
    /// Journal entries, present only when the provider approved.
    pub postings: Option<PostedPair>,
}

/// Payment repository.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
    journal: JournalEntryRepository,
    municipality_namespace: String,
}

impl PaymentRepository {
    /// Creates a payment repository with default configuration.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_journal(JournalEntryRepository::new(db))
    }

    /// Creates a payment repository numbering entries and deriving municipality ids as configured.
    #[must_use]
    pub fn with_config(db: DatabaseConnection, config: &LedgerConfig) -> Self {
        Self {
            municipality_namespace: config.municipality_namespace.clone(),
            ..Self::with_journal(JournalEntryRepository::with_config(db, config))
        }
    }

    /// Creates a payment repository on top of an existing journal repository.
    #[must_use]
    pub fn with_journal(journal: JournalEntryRepository) -> Self {
        Self {
            db: journal.connection().clone(),
            journal,
            municipality_namespace: LedgerConfig::default().municipality_namespace,
        }
    }

    /// Authorizes a payment and records the outcome.
    ///
    /// The payment row and its audit row are written whatever the provider
    /// says. Journal entries are posted only on approval, in the same
    /// transaction as the payment row; if posting fails nothing is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if posting an approved payment fails or the database fails.
    pub async fn process_payment<P>(
        &self,
        request: PaymentRequest,
        provider: &P,
    ) -> Result<PaymentOutcome, PaymentError>
    where
        P: PaymentProvider,
    {
        let method = request.credentials.method();
        let response = provider
            .authorize(&PaymentAuthorization {
                amount: request.amount,
                credentials: request.credentials.clone(),
            })
            .await;

        let payment_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        let postings = if response.is_approved() {
            let ctx = PostingContext::new(
                request.tenant_id,
                request.filer_id,
                payment_id,
                request.entry_date,
                request.created_by,
            )
            .with_municipality(municipality_entity_id_with(
                &self.municipality_namespace,
                request.tenant_id,
            ));
            let posting = PaymentPostings::payment(&ctx, request.amount, method.as_str())
                .map_err(JournalEntryError::from)?;
            Some(post_pair_in(&self.journal, &txn, posting).await?)
        } else {
            tracing::warn!(
                tenant_id = %request.tenant_id,
                filer_id = %request.filer_id,
                status = %response.status,
                reason = response.failure_reason.as_deref().unwrap_or_default(),
                "Payment not approved"
            );
            None
        };

        let row = payment_transactions::ActiveModel {
            payment_id: Set(payment_id),
            tenant_id: Set(request.tenant_id),
            filer_id: Set(request.filer_id),
            source_id: Set(request.source_id),
            amount: Set(Money::normalize(request.amount)),
            payment_method: Set(method.into()),
            status: Set(response.status.into()),
            provider_transaction_id: Set(response.provider_transaction_id.clone()),
            authorization_code: Set(response.authorization_code.clone()),
            failure_reason: Set(response.failure_reason.clone()),
            journal_entry_id: Set(postings.as_ref().map(|p| p.filer_entry.entry_id)),
            municipality_entry_id: Set(postings.as_ref().map(|p| p.municipality_entry.entry_id)),
            created_by: Set(request.created_by),
            created_at: Set(Utc::now().into()),
        };
        let payment = to_domain(row.insert(&txn).await?);

        let summary = format!(
            "{method} payment of {} {}",
            Money::new(payment.amount),
            payment.status
        );
        let details = match &payment.failure_reason {
            Some(reason) => format!("{summary}: {reason}"),
            None => summary,
        };
        AuditLogRepository::append(
            &txn,
            AuditLogInput::payment_processed(
                payment_id,
                payment.tenant_id,
                payment.created_by,
                payment.status.as_str(),
                details,
            ),
        )
        .await?;

        txn.commit().await?;

        tracing::info!(
            %payment_id,
            tenant_id = %payment.tenant_id,
            status = %payment.status,
            amount = %payment.amount,
            "Payment processed"
        );
        Ok(PaymentOutcome { payment, postings })
    }

    /// Gets one payment.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotFound` if the payment does not exist.
    pub async fn get_payment(&self, payment_id: Uuid) -> Result<PaymentRecord, PaymentError> {
        payment_transactions::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await?
            .map(to_domain)
            .ok_or(PaymentError::NotFound(payment_id))
    }

    /// Lists a filer's payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_payments_for_filer(
        &self,
        tenant_id: Uuid,
        filer_id: Uuid,
    ) -> Result<Vec<PaymentRecord>, PaymentError> {
        let rows = payment_transactions::Entity::find()
            .filter(payment_transactions::Column::TenantId.eq(tenant_id))
            .filter(payment_transactions::Column::FilerId.eq(filer_id))
            .order_by_desc(payment_transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(to_domain).collect())
    }
}

fn to_domain(model: payment_transactions::Model) -> PaymentRecord {
    PaymentRecord {
        payment_id: model.payment_id,
        tenant_id: model.tenant_id,
        filer_id: model.filer_id,
        source_id: model.source_id,
        amount: Money::normalize(model.amount),
        payment_method: model.payment_method.into(),
        status: model.status.into(),
        provider_transaction_id: model.provider_transaction_id,
        authorization_code: model.authorization_code,
        failure_reason: model.failure_reason,
        journal_entry_id: model.journal_entry_id,
        municipality_entry_id: model.municipality_entry_id,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
