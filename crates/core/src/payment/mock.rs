//! Deterministic in-process payment provider.

use std::future::{Future, ready};

use muniledger_shared::types::Money;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{PaymentAuthorization, PaymentCredentials, PaymentProvider, PaymentStatus, ProviderResponse};

/// Card number that is always declined.
pub const DECLINED_TEST_CARD: &str = "4000000000000002";
/// Card number that always fails with a processing error.
pub const ERROR_TEST_CARD: &str = "4000000000000119";

/// Mock gateway with fixed test-card behaviour. No I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPaymentProvider;

impl MockPaymentProvider {
    /// Creates the mock provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decides the outcome for a request.
    #[must_use]
    pub fn decide(&self, request: &PaymentAuthorization) -> ProviderResponse {
        let amount = request.amount;
        if amount <= Decimal::ZERO || Money::normalize(amount) != amount {
            return failure(PaymentStatus::Declined, "Invalid amount");
        }

        match &request.credentials {
            PaymentCredentials::Card { card_number, .. } if card_number == DECLINED_TEST_CARD => {
                failure(PaymentStatus::Declined, "Card declined")
            }
            PaymentCredentials::Card { card_number, .. } if card_number == ERROR_TEST_CARD => {
                failure(PaymentStatus::Error, "Processing error")
            }
            PaymentCredentials::Ach {
                routing_number,
                account_number,
            } if routing_number.trim().is_empty() || account_number.trim().is_empty() => {
                failure(PaymentStatus::Declined, "Invalid bank account details")
            }
            _ => approved(),
        }
    }
}

impl PaymentProvider for MockPaymentProvider {
    fn authorize(
        &self,
        request: &PaymentAuthorization,
    ) -> impl Future<Output = ProviderResponse> + Send {
        ready(self.decide(request))
    }
}

fn approved() -> ProviderResponse {
    let id = Uuid::new_v4().simple().to_string();
    let authorization_code = id[..6].to_uppercase();
    ProviderResponse {
        status: PaymentStatus::Approved,
        provider_transaction_id: Some(format!("mock_{id}")),
        authorization_code: Some(authorization_code),
        failure_reason: None,
    }
}

fn failure(status: PaymentStatus, reason: &str) -> ProviderResponse {
    ProviderResponse {
        status,
        provider_transaction_id: Some(format!("mock_{}", Uuid::new_v4().simple())),
        authorization_code: None,
        failure_reason: Some(reason.to_string()),
    }
}
