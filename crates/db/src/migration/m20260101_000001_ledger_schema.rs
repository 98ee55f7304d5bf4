//! Ledger schema migration.
//!
//! Creates the ledger tables from the entity definitions, so the schema is
//! the same on `PostgreSQL` and `SQLite`, and seeds the standard chart of accounts.

use muniledger_core::chart::ChartOfAccounts;
use sea_orm::{EntityTrait, Schema, Set};
use sea_orm_migration::prelude::*;

use crate::entities::{
    accounts, audit_logs, entry_sequences, journal_entries, journal_entry_lines,
    payment_transactions,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Referenced tables first
        manager
            .create_table(schema.create_table_from_entity(accounts::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(journal_entries::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(journal_entry_lines::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(audit_logs::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(entry_sequences::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(payment_transactions::Entity))
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_journal_entries_tenant_number")
                    .table(journal_entries::Entity)
                    .col(journal_entries::Column::TenantId)
                    .col(journal_entries::Column::EntryNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_entity_date")
                    .table(journal_entries::Entity)
                    .col(journal_entries::Column::TenantId)
                    .col(journal_entries::Column::EntityId)
                    .col(journal_entries::Column::EntryDate)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entry_lines_entry")
                    .table(journal_entry_lines::Entity)
                    .col(journal_entry_lines::Column::EntryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_entity")
                    .table(audit_logs::Entity)
                    .col(audit_logs::Column::EntityId)
                    .to_owned(),
            )
            .await?;

        let seed = ChartOfAccounts::standard()
            .accounts()
            .map(|account| accounts::ActiveModel {
                account_number: Set(account.account_number.clone()),
                account_name: Set(account.account_name.clone()),
                account_type: Set(account.account_type.into()),
                normal_balance: Set(account.normal_balance.into()),
            })
            .collect::<Vec<_>>();
        accounts::Entity::insert_many(seed)
            .exec_without_returning(manager.get_connection())
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(payment_transactions::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(entry_sequences::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(audit_logs::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(journal_entry_lines::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(journal_entries::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(accounts::Entity).to_owned())
            .await?;
        Ok(())
    }
}
