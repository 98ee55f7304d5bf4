//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod audit_logs;
pub mod entry_sequences;
pub mod journal_entries;
pub mod journal_entry_lines;
pub mod payment_transactions;
pub mod sea_orm_active_enums;
