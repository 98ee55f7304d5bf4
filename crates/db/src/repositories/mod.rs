//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod audit_log;
pub mod journal_entry;
pub mod payment;
pub mod posting;
pub mod report;
pub mod sequence;

pub use audit_log::AuditLogRepository;
pub use journal_entry::{JournalEntryError, JournalEntryRepository};
pub use payment::{PaymentError, PaymentOutcome, PaymentRecord, PaymentRepository, PaymentRequest};
pub use posting::{PostedPair, PostingRepository};
pub use report::{ReportRepository, ReportRepositoryError};
pub use sequence::{CounterSequenceAllocator, SequenceAllocator};
