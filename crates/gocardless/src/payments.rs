//! Payment collection against an existing mandate.

use common_enums::{Currency, PaymentStatus};
use common_utils::{
    date_time,
    errors::{CustomResult, ValidationError},
    types::MinorUnit,
};
use error_stack::{report, ResultExt};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    bank_accounts::ResourceMetadata, client::Gocardless, consts, errors::GocardlessError,
};

/// Caller inputs to payment creation.
#[derive(Clone, Debug, Default)]
pub struct PaymentParams {
    /// Amount in minor currency units (pence/cents). Must be positive.
    pub amount: MinorUnit,
    pub description: Option<String>,
    /// Shown on the payer's bank statement; truncated to the provider
    /// maximum. A deterministic timestamp-derived reference is used when
    /// absent.
    pub reference: Option<String>,
    /// Serialized as a calendar date, no time component. The provider picks
    /// the earliest chargeable date when absent.
    pub charge_date: Option<Date>,
    /// Advisory only: the outgoing currency is always derived from the
    /// mandate's scheme, preventing currency/scheme mismatches the provider
    /// would reject.
    pub currency: Option<Currency>,
}

pub(crate) fn build_reference(requested: Option<&str>, unix_timestamp: i64) -> String {
    let reference = match requested.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_owned(),
        None => format!("DD-{unix_timestamp}"),
    };
    reference
        .chars()
        .take(consts::MAX_PAYMENT_REFERENCE_LENGTH)
        .collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct GocardlessPaymentsRequest {
    payments: PaymentWireParams,
}

#[derive(Debug, Serialize)]
struct PaymentWireParams {
    amount: MinorUnit,
    currency: Currency,
    reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    charge_date: Option<String>,
    links: MandateLink,
    metadata: ResourceMetadata,
}

#[derive(Debug, Serialize)]
struct MandateLink {
    mandate: String,
}

impl GocardlessPaymentsRequest {
    pub(crate) fn new(
        mandate_id: &str,
        params: &PaymentParams,
        currency: Currency,
        unix_timestamp: i64,
        metadata_source: &str,
    ) -> Self {
        Self {
            payments: PaymentWireParams {
                amount: params.amount,
                currency,
                reference: build_reference(params.reference.as_deref(), unix_timestamp),
                description: params.description.clone(),
                charge_date: params.charge_date.map(|date| date.to_string()),
                links: MandateLink {
                    mandate: mandate_id.to_owned(),
                },
                metadata: ResourceMetadata {
                    source: metadata_source.to_owned(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct GocardlessPaymentsResponse {
    pub(crate) payments: Payment,
}

/// Provider payment resource, linked to exactly one mandate.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Payment {
    pub id: String,
    pub amount: MinorUnit,
    pub currency: Currency,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub charge_date: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub links: PaymentLinks,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PaymentLinks {
    #[serde(default)]
    pub mandate: Option<String>,
}

impl Gocardless {
    /// Collect a payment against a mandate.
    ///
    /// The mandate is fetched first to read its scheme; the outgoing
    /// currency is derived from that scheme regardless of what the caller
    /// requested. No automatic retry — a caller retry with the same
    /// idempotency token remains safe to resend.
    #[tracing::instrument(skip_all, fields(mandate_id = %mandate_id))]
    pub async fn create_payment(
        &self,
        mandate_id: &str,
        params: &PaymentParams,
    ) -> CustomResult<Payment, GocardlessError> {
        if !params.amount.is_positive() {
            return Err(report!(ValidationError::InvalidValue {
                message: format!(
                    "payment amount must be a positive count of minor units, got {}",
                    params.amount
                ),
            })
            .change_context(GocardlessError::PaymentCreationFailed));
        }

        let mandate = self
            .get_mandate(mandate_id)
            .await
            .change_context(GocardlessError::PaymentCreationFailed)?;
        if !mandate.status.is_active_eligible() {
            tracing::warn!(
                status = %mandate.status,
                "collecting against a mandate outside an active-eligible status"
            );
        }

        let currency = mandate.scheme.currency();
        if let Some(requested) = params.currency {
            if requested != currency {
                tracing::warn!(
                    requested = %requested,
                    derived = %currency,
                    scheme = %mandate.scheme,
                    "caller-supplied currency overridden by scheme-derived currency"
                );
            }
        }

        let request = GocardlessPaymentsRequest::new(
            mandate_id,
            params,
            currency,
            date_time::now_unix_timestamp(),
            &self.settings.metadata_source,
        );
        let response: GocardlessPaymentsResponse = self
            .post("/payments", &request)
            .await
            .change_context(GocardlessError::PaymentCreationFailed)?;
        tracing::info!(
            payment_id = %response.payments.id,
            currency = %response.payments.currency,
            "created payment"
        );
        Ok(response.payments)
    }

    /// Query a payment's current state.
    #[tracing::instrument(skip_all, fields(payment_id = %payment_id))]
    pub async fn get_payment(&self, payment_id: &str) -> CustomResult<Payment, GocardlessError> {
        let response: GocardlessPaymentsResponse = self
            .get(&format!("/payments/{payment_id}"))
            .await
            .change_context(GocardlessError::PaymentRetrieveFailed)?;
        Ok(response.payments)
    }
}

#[cfg(test)]
mod tests {
    use common_enums::DirectDebitScheme;
    use test_case::test_case;

    use super::*;

    #[test]
    fn request_uses_scheme_derived_currency() {
        let params = PaymentParams {
            amount: MinorUnit::new(2500),
            currency: Some(Currency::GBP),
            ..Default::default()
        };
        let currency = DirectDebitScheme::SepaCore.currency();
        let request = GocardlessPaymentsRequest::new("MD123", &params, currency, 1_700_000_000, "source");
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["payments"]["currency"], "EUR");
        assert_eq!(value["payments"]["amount"], 2500);
        assert_eq!(value["payments"]["links"]["mandate"], "MD123");
    }

    #[test_case(Some("INV-2024-0042"), "INV-2024-0"; "long references are truncated to ten characters")]
    #[test_case(Some("SUB-42"), "SUB-42"; "short references pass through")]
    #[test_case(Some("   "), "DD-1700000"; "blank references get the fallback")]
    #[test_case(None, "DD-1700000"; "absent references get the fallback")]
    fn reference_handling(requested: Option<&str>, expected: &str) {
        assert_eq!(build_reference(requested, 1_700_000_000), expected);
    }

    #[test]
    fn charge_date_is_serialized_as_calendar_date() {
        let params = PaymentParams {
            amount: MinorUnit::new(1000),
            charge_date: Some(time::macros::date!(2026 - 08 - 14)),
            ..Default::default()
        };
        let request =
            GocardlessPaymentsRequest::new("MD123", &params, Currency::GBP, 0, "source");
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["payments"]["charge_date"], "2026-08-14");
    }

    #[test]
    fn absent_charge_date_is_omitted() {
        let params = PaymentParams {
            amount: MinorUnit::new(1000),
            ..Default::default()
        };
        let request =
            GocardlessPaymentsRequest::new("MD123", &params, Currency::GBP, 0, "source");
        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value["payments"].get("charge_date").is_none());
    }
}
