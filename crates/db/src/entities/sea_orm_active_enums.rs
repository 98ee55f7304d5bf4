//! `SeaORM` active enums stored as short strings.
//!
//! Each enum mirrors a domain enum in `muniledger-core` and converts both ways.

use muniledger_core::{chart, ledger, payment};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AccountType {
    #[sea_orm(string_value = "ASSET")]
    Asset,
    #[sea_orm(string_value = "LIABILITY")]
    Liability,
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum NormalBalance {
    #[sea_orm(string_value = "DEBIT")]
    Debit,
    #[sea_orm(string_value = "CREDIT")]
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EntryStatus {
    #[sea_orm(string_value = "POSTED")]
    Posted,
    #[sea_orm(string_value = "REVERSED")]
    Reversed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SourceType {
    #[sea_orm(string_value = "ASSESSMENT")]
    Assessment,
    #[sea_orm(string_value = "PAYMENT")]
    Payment,
    #[sea_orm(string_value = "REFUND")]
    Refund,
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
    #[sea_orm(string_value = "PENALTY")]
    Penalty,
    #[sea_orm(string_value = "INTEREST")]
    Interest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "CREDIT_CARD")]
    CreditCard,
    #[sea_orm(string_value = "ACH")]
    Ach,
    #[sea_orm(string_value = "CHECK")]
    Check,
    #[sea_orm(string_value = "WIRE")]
    Wire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "DECLINED")]
    Declined,
    #[sea_orm(string_value = "ERROR")]
    Error,
}

impl From<chart::AccountType> for AccountType {
    fn from(value: chart::AccountType) -> Self {
        match value {
            chart::AccountType::Asset => Self::Asset,
            chart::AccountType::Liability => Self::Liability,
            chart::AccountType::Revenue => Self::Revenue,
            chart::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for chart::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<chart::NormalBalance> for NormalBalance {
    fn from(value: chart::NormalBalance) -> Self {
        match value {
            chart::NormalBalance::Debit => Self::Debit,
            chart::NormalBalance::Credit => Self::Credit,
        }
    }
}

impl From<ledger::EntryStatus> for EntryStatus {
    fn from(value: ledger::EntryStatus) -> Self {
        match value {
            ledger::EntryStatus::Posted => Self::Posted,
            ledger::EntryStatus::Reversed => Self::Reversed,
        }
    }
}

impl From<EntryStatus> for ledger::EntryStatus {
    fn from(value: EntryStatus) -> Self {
        match value {
            EntryStatus::Posted => Self::Posted,
            EntryStatus::Reversed => Self::Reversed,
        }
    }
}

impl From<ledger::SourceType> for SourceType {
    fn from(value: ledger::SourceType) -> Self {
        match value {
            ledger::SourceType::Assessment => Self::Assessment,
            ledger::SourceType::Payment => Self::Payment,
            ledger::SourceType::Refund => Self::Refund,
            ledger::SourceType::Adjustment => Self::Adjustment,
            ledger::SourceType::Penalty => Self::Penalty,
            ledger::SourceType::Interest => Self::Interest,
        }
    }
}

impl From<SourceType> for ledger::SourceType {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::Assessment => Self::Assessment,
            SourceType::Payment => Self::Payment,
            SourceType::Refund => Self::Refund,
            SourceType::Adjustment => Self::Adjustment,
            SourceType::Penalty => Self::Penalty,
            SourceType::Interest => Self::Interest,
        }
    }
}

impl From<payment::PaymentMethod> for PaymentMethod {
    fn from(value: payment::PaymentMethod) -> Self {
        match value {
            payment::PaymentMethod::CreditCard => Self::CreditCard,
            payment::PaymentMethod::Ach => Self::Ach,
            payment::PaymentMethod::Check => Self::Check,
            payment::PaymentMethod::Wire => Self::Wire,
        }
    }
}

impl From<PaymentMethod> for payment::PaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::CreditCard => Self::CreditCard,
            PaymentMethod::Ach => Self::Ach,
            PaymentMethod::Check => Self::Check,
            PaymentMethod::Wire => Self::Wire,
        }
    }
}

impl From<PaymentStatus> for payment::PaymentStatus {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Approved => Self::Approved,
            PaymentStatus::Declined => Self::Declined,
            PaymentStatus::Error => Self::Error,
        }
    }
}

impl From<payment::PaymentStatus> for PaymentStatus {
    fn from(value: payment::PaymentStatus) -> Self {
        match value {
            payment::PaymentStatus::Approved => Self::Approved,
            payment::PaymentStatus::Declined => Self::Declined,
            payment::PaymentStatus::Error => Self::Error,
        }
    }
}
