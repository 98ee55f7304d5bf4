//! Chart of accounts.
//!
//! The chart is immutable reference data shared by the filer and municipality
//! sub-ledgers. The ledger only reads it: to validate that a posted line
//! references a known account, and to classify balances for reports.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Well-known account numbers of the standard municipal chart.
pub mod accounts {
    /// Filer cash.
    pub const CASH: &str = "1000";
    /// Municipality cash - tax receipts.
    pub const CASH_RECEIPTS: &str = "1001";
    /// Filer refund receivable.
    pub const REFUND_RECEIVABLE: &str = "1100";
    /// Municipality accounts receivable - taxes.
    pub const ACCOUNTS_RECEIVABLE: &str = "1201";
    /// Filer tax liability.
    pub const TAX_LIABILITY: &str = "2100";
    /// Filer penalty liability.
    pub const PENALTY_LIABILITY: &str = "2200";
    /// Filer interest liability.
    pub const INTEREST_LIABILITY: &str = "2300";
    /// Municipality refunds payable.
    pub const REFUNDS_PAYABLE: &str = "2400";
    /// Municipality tax revenue.
    pub const TAX_REVENUE: &str = "4100";
    /// Municipality penalty revenue.
    pub const PENALTY_REVENUE: &str = "4200";
    /// Municipality interest revenue.
    pub const INTEREST_REVENUE: &str = "4300";
    /// Filer tax expense.
    pub const TAX_EXPENSE: &str = "6100";
    /// Filer penalty expense.
    pub const PENALTY_EXPENSE: &str = "6200";
    /// Filer interest expense.
    pub const INTEREST_EXPENSE: &str = "6300";
}

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Assets (cash, receivables).
    Asset,
    /// Liabilities (tax owed, refunds payable).
    Liability,
    /// Revenue (municipal tax income).
    Revenue,
    /// Expenses (filer tax expense).
    Expense,
}

impl AccountType {
    /// All account types in reporting order.
    pub const ALL: [Self; 4] = [Self::Asset, Self::Liability, Self::Revenue, Self::Expense];

    /// Returns the side on which the account increases.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Net balance of an account of this type.
    ///
    /// - Asset/Expense: debit - credit
    /// - Liability/Revenue: credit - debit
    #[must_use]
    pub fn net_balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self.normal_balance() {
            NormalBalance::Debit => debit - credit,
            NormalBalance::Credit => credit - debit,
        }
    }

    /// Classifies an account number that is missing from the chart by its leading digit.
    #[must_use]
    pub fn infer_from_number(account_number: &str) -> Self {
        match account_number.chars().next() {
            Some('1') => Self::Asset,
            Some('2' | '3') => Self::Liability,
            Some('4') => Self::Revenue,
            _ => Self::Expense,
        }
    }

    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASSET" => Ok(Self::Asset),
            "LIABILITY" => Ok(Self::Liability),
            "REVENUE" => Ok(Self::Revenue),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// Side on which an account's balance increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalBalance {
    /// Increases with debits.
    Debit,
    /// Increases with credits.
    Credit,
}

/// A ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable account number, e.g. "1000".
    pub account_number: String,
    /// Display name.
    pub account_name: String,
    /// Classification.
    pub account_type: AccountType,
    /// Side on which the account increases.
    pub normal_balance: NormalBalance,
}

impl Account {
    /// Creates an account whose normal balance follows its type.
    #[must_use]
    pub fn new(account_number: &str, account_name: &str, account_type: AccountType) -> Self {
        Self {
            account_number: account_number.to_string(),
            account_name: account_name.to_string(),
            account_type,
            normal_balance: account_type.normal_balance(),
        }
    }
}

/// Returns true if the account number belongs to a liability account (prefix "2").
#[must_use]
pub fn is_liability_account(account_number: &str) -> bool {
    account_number.starts_with('2')
}

/// Returns true for the filer cash account.
#[must_use]
pub fn is_cash_account(account_number: &str) -> bool {
    account_number == accounts::CASH
}

/// Static lookup of ledger accounts keyed by account number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOfAccounts {
    accounts: BTreeMap<String, Account>,
}

impl ChartOfAccounts {
    /// Builds a chart from a list of accounts. Later duplicates replace earlier ones.
    #[must_use]
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.account_number.clone(), account))
                .collect(),
        }
    }

    /// The standard chart shared by filer and municipality sub-ledgers.
    #[must_use]
    pub fn standard() -> Self {
        use accounts::*;

        Self::new([
            Account::new(CASH, "Cash", AccountType::Asset),
            Account::new(CASH_RECEIPTS, "Cash - Tax Receipts", AccountType::Asset),
            Account::new(REFUND_RECEIVABLE, "Refund Receivable", AccountType::Asset),
            Account::new(ACCOUNTS_RECEIVABLE, "Accounts Receivable - Taxes", AccountType::Asset),
            Account::new(TAX_LIABILITY, "Tax Liability", AccountType::Liability),
            Account::new(PENALTY_LIABILITY, "Penalty Liability", AccountType::Liability),
            Account::new(INTEREST_LIABILITY, "Interest Liability", AccountType::Liability),
            Account::new(REFUNDS_PAYABLE, "Refunds Payable", AccountType::Liability),
            Account::new(TAX_REVENUE, "Tax Revenue", AccountType::Revenue),
            Account::new(PENALTY_REVENUE, "Penalty Revenue", AccountType::Revenue),
            Account::new(INTEREST_REVENUE, "Interest Revenue", AccountType::Revenue),
            Account::new(TAX_EXPENSE, "Tax Expense", AccountType::Expense),
            Account::new(PENALTY_EXPENSE, "Penalty Expense", AccountType::Expense),
            Account::new(INTEREST_EXPENSE, "Interest Expense", AccountType::Expense),
        ])
    }

    /// Looks up an account by number.
    #[must_use]
    pub fn get(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    /// Returns true if the account number exists.
    #[must_use]
    pub fn contains(&self, account_number: &str) -> bool {
        self.accounts.contains_key(account_number)
    }

    /// All accounts ordered by account number.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts of one type ordered by account number.
    pub fn by_type(&self, account_type: AccountType) -> impl Iterator<Item = &Account> {
        self.accounts
            .values()
            .filter(move |account| account.account_type == account_type)
    }

    /// Number of accounts in the chart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self::standard()
    }
}
