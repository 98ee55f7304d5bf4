//! Report repository: loads ledger snapshots and hands them to the report builders.
//!
//! Each report reads inside a single transaction so it sees one consistent
//! snapshot. On `PostgreSQL` that transaction is REPEATABLE READ and read-only.

use chrono::{NaiveDate, Utc};
use muniledger_core::entity::municipality_entity_id_with;
use muniledger_core::ledger::JournalEntry;
use muniledger_core::reports::{
    AccountStatement, Period, ReconciliationReport, Reconciler, ReportError, StatementBuilder,
    TrialBalanceBuilder, TrialBalanceReport,
};
use muniledger_shared::{AppError, LedgerConfig};
use sea_orm::{
    AccessMode, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use super::journal_entry::{hydrate, load_chart};
use crate::entities::journal_entries;

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportRepositoryError {
    /// Invalid report arguments.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ReportRepositoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Report(err) => err.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Report(err) => err.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

impl From<ReportRepositoryError> for AppError {
    fn from(err: ReportRepositoryError) -> Self {
        match err {
            ReportRepositoryError::Report(err) => Self::Validation(err.to_string()),
            ReportRepositoryError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
    municipality_namespace: String,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_config(db, &LedgerConfig::default())
    }

    /// Creates a report repository deriving municipality ids as configured.
    #[must_use]
    pub fn with_config(db: DatabaseConnection, config: &LedgerConfig) -> Self {
        Self {
            db,
            municipality_namespace: config.municipality_namespace.clone(),
        }
    }

    /// The municipality pseudo-entity of a tenant.
    #[must_use]
    pub fn municipality_id(&self, tenant_id: Uuid) -> Uuid {
        municipality_entity_id_with(&self.municipality_namespace, tenant_id)
    }

    /// Generates a filer's tax liability and payment statement.
    ///
    /// `None` bounds are open.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end` or the query fails.
    pub async fn generate_filer_statement(
        &self,
        tenant_id: Uuid,
        filer_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<AccountStatement, ReportRepositoryError> {
        let txn = self.snapshot().await?;
        let entries = entries_where(
            &txn,
            Condition::all()
                .add(journal_entries::Column::TenantId.eq(tenant_id))
                .add(journal_entries::Column::EntityId.eq(filer_id)),
        )
        .await?;
        txn.commit().await?;

        let statement =
            StatementBuilder::build(filer_id, &entries, start, end, Utc::now().date_naive())?;
        tracing::debug!(
            %tenant_id,
            entity_id = %filer_id,
            transactions = statement.transactions.len(),
            ending_balance = %statement.ending_balance,
            "Filer statement generated"
        );
        Ok(statement)
    }

    /// Generates the municipality trial balance as of a date, inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn generate_trial_balance(
        &self,
        tenant_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<TrialBalanceReport, ReportRepositoryError> {
        let municipality_id = self.municipality_id(tenant_id);

        let txn = self.snapshot().await?;
        let chart = load_chart(&txn).await?;
        let entries = entries_where(
            &txn,
            Condition::all()
                .add(journal_entries::Column::TenantId.eq(tenant_id))
                .add(journal_entries::Column::EntityId.eq(municipality_id))
                .add(journal_entries::Column::EntryDate.lte(as_of)),
        )
        .await?;
        txn.commit().await?;

        let report = TrialBalanceBuilder::build(&chart, tenant_id, municipality_id, &entries, as_of);
        if report.is_balanced() {
            tracing::debug!(%tenant_id, %as_of, "Trial balance generated");
        } else {
            tracing::warn!(
                %tenant_id,
                %as_of,
                difference = %report.difference,
                "Trial balance is unbalanced"
            );
        }
        Ok(report)
    }

    /// Generates the trial balance at the last day of a period.
    ///
    /// Period codes are `Q1`-`Q4`, `M1`-`M12` and `YEAR`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidPeriod` for an unknown code, or an error
    /// if the query fails.
    pub async fn generate_trial_balance_for_period(
        &self,
        tenant_id: Uuid,
        year: i32,
        period: &str,
    ) -> Result<TrialBalanceReport, ReportRepositoryError> {
        let as_of = Period::parse(period)?.end_date(year)?;
        self.generate_trial_balance(tenant_id, as_of).await
    }

    /// Compares the municipality sub-ledger with all filer sub-ledgers of the tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn generate_reconciliation_report(
        &self,
        tenant_id: Uuid,
        municipality_id: Uuid,
    ) -> Result<ReconciliationReport, ReportRepositoryError> {
        let txn = self.snapshot().await?;
        let municipality_entries = entries_where(
            &txn,
            Condition::all()
                .add(journal_entries::Column::TenantId.eq(tenant_id))
                .add(journal_entries::Column::EntityId.eq(municipality_id)),
        )
        .await?;
        let filer_entries = entries_where(
            &txn,
            Condition::all()
                .add(journal_entries::Column::TenantId.eq(tenant_id))
                .add(journal_entries::Column::EntityId.ne(municipality_id)),
        )
        .await?;
        txn.commit().await?;

        let report = Reconciler::reconcile(
            tenant_id,
            municipality_id,
            &municipality_entries,
            &filer_entries,
            Utc::now().date_naive(),
        );
        if !report.is_reconciled() {
            tracing::warn!(
                %tenant_id,
                ar_variance = %report.ar_variance,
                cash_variance = %report.cash_variance,
                "Reconciliation found discrepancies"
            );
        }
        Ok(report)
    }

    /// Opens the read transaction for one report.
    async fn snapshot(&self) -> Result<DatabaseTransaction, DbErr> {
        match self.db.get_database_backend() {
            DbBackend::Postgres => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::RepeatableRead),
                        Some(AccessMode::ReadOnly),
                    )
                    .await
            }
            _ => self.db.begin().await,
        }
    }
}

/// Loads matching entries in ledger order.
async fn entries_where(
    txn: &DatabaseTransaction,
    condition: Condition,
) -> Result<Vec<JournalEntry>, DbErr> {
    let headers = journal_entries::Entity::find()
        .filter(condition)
        .order_by_asc(journal_entries::Column::EntryDate)
        .all(txn)
        .await?;
    let mut entries = hydrate(txn, headers).await?;
    entries.sort_by(|a, b| a.ledger_order_key().cmp(&b.ledger_order_key()));
    Ok(entries)
}
