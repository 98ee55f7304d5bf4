//! Payment provider contract.
//!
//! The ledger treats the gateway as a pass-through collaborator: it submits
//! an authorization request and gets back APPROVED, DECLINED or ERROR with a
//! provider transaction id. Journal entries are posted only on APPROVED.

mod mock;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use mock::{DECLINED_TEST_CARD, ERROR_TEST_CARD, MockPaymentProvider};

/// How the filer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Credit or debit card.
    CreditCard,
    /// Bank transfer via ACH.
    Ach,
    /// Paper check.
    Check,
    /// Wire transfer.
    Wire,
}

impl PaymentMethod {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "CREDIT_CARD",
            Self::Ach => "ACH",
            Self::Check => "CHECK",
            Self::Wire => "WIRE",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREDIT_CARD" => Ok(Self::CreditCard),
            "ACH" => Ok(Self::Ach),
            "CHECK" => Ok(Self::Check),
            "WIRE" => Ok(Self::Wire),
            _ => Err(format!("Unknown payment method: {s}")),
        }
    }
}

/// Provider outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Funds authorized; the ledger posts the payment.
    Approved,
    /// Provider refused the payment.
    Declined,
    /// Provider failed to process the payment.
    Error,
}

impl PaymentStatus {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method-specific credentials handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentCredentials {
    /// Card details.
    Card {
        /// Primary account number.
        card_number: String,
        /// Expiry in `MM/YY`.
        expiry: String,
        /// Card verification value.
        cvv: String,
    },
    /// Bank account details.
    Ach {
        /// Bank routing number.
        routing_number: String,
        /// Bank account number.
        account_number: String,
    },
    /// Check details.
    Check {
        /// Check number.
        check_number: String,
    },
    /// Wire details.
    Wire {
        /// Sender's wire reference.
        reference: String,
    },
}

impl PaymentCredentials {
    /// The payment method these credentials belong to.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Card { .. } => PaymentMethod::CreditCard,
            Self::Ach { .. } => PaymentMethod::Ach,
            Self::Check { .. } => PaymentMethod::Check,
            Self::Wire { .. } => PaymentMethod::Wire,
        }
    }
}

/// Authorization request sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    /// Amount to charge.
    pub amount: Decimal,
    /// Credentials for the chosen method.
    pub credentials: PaymentCredentials,
}

/// Provider reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Outcome.
    pub status: PaymentStatus,
    /// Provider-side transaction id.
    pub provider_transaction_id: Option<String>,
    /// Authorization code on approval.
    pub authorization_code: Option<String>,
    /// Reason on decline or error.
    pub failure_reason: Option<String>,
}

impl ProviderResponse {
    /// Returns true when the ledger should post the payment.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == PaymentStatus::Approved
    }
}

/// Payment gateway capability.
///
/// Implemented by the mock provider here and by real gateway adapters elsewhere.
pub trait PaymentProvider: Send + Sync {
    /// Submits an authorization and returns the provider's verdict.
    ///
    /// Transport failures are reported as `PaymentStatus::Error`, never as a panic.
    fn authorize(
        &self,
        request: &PaymentAuthorization,
    ) -> impl Future<Output = ProviderResponse> + Send;
}
