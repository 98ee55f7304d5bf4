//! Core business logic for the municipal tax ledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and report calculations live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts and account classification
//! - `ledger` - Journal entries, numbering, validation and reversal
//! - `audit` - Append-only audit trail records
//! - `entity` - Municipality pseudo-entity derivation
//! - `reports` - Statements, trial balance and reconciliation
//! - `postings` - Dual filer/municipality postings for business events
//! - `payment` - Payment provider contract and mock gateway

pub mod audit;
pub mod chart;
pub mod entity;
pub mod ledger;
pub mod payment;
pub mod postings;
pub mod reports;
