//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::audit_logs::Entity as AuditLogs;
pub use super::entry_sequences::Entity as EntrySequences;
pub use super::journal_entries::Entity as JournalEntries;
pub use super::journal_entry_lines::Entity as JournalEntryLines;
pub use super::payment_transactions::Entity as PaymentTransactions;
