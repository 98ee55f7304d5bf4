//! Demo runner for the municipal tax ledger.
//!
//! Migrates the configured database, posts an assessment and a card payment
//! for a demo filer, then logs the filer statement, the municipality trial
//! balance and the reconciliation report.
//!
//! Usage: `MUNILEDGER__DATABASE__URL=sqlite://demo.db?mode=rwc cargo run --bin seeder`

use anyhow::Context;
use chrono::Utc;
use muniledger_core::entity::municipality_entity_id_with;
use muniledger_core::payment::{MockPaymentProvider, PaymentCredentials};
use muniledger_core::postings::{AssessmentAmounts, PostingContext};
use muniledger_db::migration::{Migrator, MigratorTrait};
use muniledger_db::{
    JournalEntryRepository, PaymentRepository, PaymentRequest, PostingRepository, ReportRepository,
};
use muniledger_shared::types::Money;
use muniledger_shared::{AppConfig, LoggingConfig};
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Demo tenant (consistent across runs).
const DEMO_TENANT_ID: Uuid = Uuid::from_u128(0x0000_0001);
/// Demo filer.
const DEMO_FILER_ID: Uuid = Uuid::from_u128(0x0000_0002);
/// Demo clerk posting the events.
const DEMO_USER_ID: Uuid = Uuid::from_u128(0x0000_0003);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = muniledger_db::connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    info!("Database ready");

    let today = Utc::now().date_naive();
    let municipality_id =
        municipality_entity_id_with(&config.ledger.municipality_namespace, DEMO_TENANT_ID);
    let journal = JournalEntryRepository::with_config(db.clone(), &config.ledger);

    let ctx = PostingContext::new(DEMO_TENANT_ID, DEMO_FILER_ID, Uuid::new_v4(), today, DEMO_USER_ID)
        .with_municipality(municipality_id);
    let amounts = AssessmentAmounts::new(dec!(10000), dec!(250), dec!(37.50));
    let assessment = PostingRepository::with_journal(journal.clone())
        .record_assessment(&ctx, amounts, "2024 annual return")
        .await?;
    info!(
        filer_entry = %assessment.filer_entry.entry_number,
        municipality_entry = %assessment.municipality_entry.entry_number,
        total = %Money::new(amounts.total()),
        "Assessment posted"
    );

    let payments = PaymentRepository::with_config(db.clone(), &config.ledger);
    let outcome = payments
        .process_payment(
            PaymentRequest {
                tenant_id: DEMO_TENANT_ID,
                filer_id: DEMO_FILER_ID,
                source_id: assessment.source_id,
                amount: amounts.total(),
                credentials: PaymentCredentials::Card {
                    card_number: "4242424242424242".to_string(),
                    expiry: "12/29".to_string(),
                    cvv: "123".to_string(),
                },
                entry_date: today,
                created_by: DEMO_USER_ID,
            },
            &MockPaymentProvider::new(),
        )
        .await?;
    info!(
        payment_id = %outcome.payment.payment_id,
        status = %outcome.payment.status,
        "Payment processed"
    );

    let reports = ReportRepository::with_config(db, &config.ledger);
    let statement = reports
        .generate_filer_statement(DEMO_TENANT_ID, DEMO_FILER_ID, None, None)
        .await?;
    info!(
        ending_balance = %Money::new(statement.ending_balance),
        transactions = statement.transactions.len(),
        "Filer statement"
    );

    let trial_balance = reports
        .generate_trial_balance(DEMO_TENANT_ID, today)
        .await?;
    info!(
        status = %trial_balance.status,
        total_debits = %Money::new(trial_balance.total_debits),
        total_credits = %Money::new(trial_balance.total_credits),
        "Trial balance"
    );

    let reconciliation = reports
        .generate_reconciliation_report(DEMO_TENANT_ID, municipality_id)
        .await?;
    info!(
        status = %reconciliation.status,
        report = %serde_json::to_string(&reconciliation)?,
        "Reconciliation"
    );

    Ok(())
}

/// Installs the global subscriber. `LOG_FORMAT=json` or `logging.json` selects JSON lines.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let json = logging.json
        || std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
