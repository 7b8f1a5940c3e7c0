//! Mandate creation and retrieval.

use std::net::Ipv4Addr;

use common_enums::{DirectDebitScheme, MandateStatus};
use common_utils::errors::CustomResult;
use error_stack::ResultExt;
use masking::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    bank_accounts::ResourceMetadata, client::Gocardless, errors::GocardlessError, rules,
};

/// Caller inputs to mandate creation. Everything is optional: scheme
/// resolution falls back through the country rule to Bacs.
#[derive(Clone, Debug, Default)]
pub struct MandateParams {
    /// Explicit scheme, wins over country derivation.
    pub scheme: Option<DirectDebitScheme>,
    /// Used to derive the scheme when none is given explicitly.
    pub country_code: Option<String>,
    /// Origin address of the payer's authorization. Only consulted for ACH;
    /// substituted by the configured fallback when absent, loopback, or not
    /// a dotted-quad IPv4 literal.
    pub payer_ip_address: Option<String>,
}

/// Scheme resolution order: explicit argument, then country rule, then Bacs.
pub(crate) fn resolve_scheme(params: &MandateParams) -> DirectDebitScheme {
    params.scheme.unwrap_or_else(|| {
        params
            .country_code
            .as_deref()
            .map(|country| rules::resolve_rule(country).scheme)
            .unwrap_or_default()
    })
}

/// Resolve the payer IP that goes out on an ACH mandate.
///
/// Loopback addresses are common when callers run behind local development
/// network stacks; substituting a public fallback keeps mandate creation
/// resilient rather than failing the call.
pub(crate) fn resolve_payer_ip(supplied: Option<&str>, fallback: Ipv4Addr) -> Ipv4Addr {
    supplied
        .and_then(|raw| raw.trim().parse::<Ipv4Addr>().ok())
        .filter(|address| !address.is_loopback())
        .unwrap_or(fallback)
}

#[derive(Debug, Serialize)]
pub(crate) struct GocardlessMandateRequest {
    mandates: MandateWireParams,
}

#[derive(Debug, Serialize)]
struct MandateWireParams {
    scheme: DirectDebitScheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    payer_ip_address: Option<Secret<String, common_utils::pii::IpAddress>>,
    links: BankAccountLink,
    metadata: ResourceMetadata,
}

#[derive(Debug, Serialize)]
struct BankAccountLink {
    customer_bank_account: String,
}

impl GocardlessMandateRequest {
    pub(crate) fn new(
        bank_account_id: &str,
        params: &MandateParams,
        fallback_payer_ip: Ipv4Addr,
        metadata_source: &str,
    ) -> Self {
        let scheme = resolve_scheme(params);
        let payer_ip_address = (scheme == DirectDebitScheme::Ach).then(|| {
            let address = resolve_payer_ip(params.payer_ip_address.as_deref(), fallback_payer_ip);
            Secret::new(address.to_string())
        });
        Self {
            mandates: MandateWireParams {
                scheme,
                payer_ip_address,
                links: BankAccountLink {
                    customer_bank_account: bank_account_id.to_owned(),
                },
                metadata: ResourceMetadata {
                    source: metadata_source.to_owned(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct GocardlessMandateResponse {
    pub(crate) mandates: Mandate,
}

/// Provider mandate resource. The scheme is fixed at creation and never
/// changes; the status only moves through webhook events afterwards.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Mandate {
    pub id: String,
    pub scheme: DirectDebitScheme,
    #[serde(default)]
    pub status: MandateStatus,
    #[serde(default)]
    pub links: MandateLinks,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MandateLinks {
    #[serde(default)]
    pub customer_bank_account: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
}

impl Gocardless {
    /// Create a mandate against an existing customer bank account.
    ///
    /// The result's initial status is `pending_submission` in the common
    /// case; all later transitions come from webhook events, never from this
    /// call.
    #[tracing::instrument(skip_all, fields(bank_account_id = %bank_account_id))]
    pub async fn create_mandate(
        &self,
        bank_account_id: &str,
        params: &MandateParams,
    ) -> CustomResult<Mandate, GocardlessError> {
        let request = GocardlessMandateRequest::new(
            bank_account_id,
            params,
            self.settings.fallback_payer_ip,
            &self.settings.metadata_source,
        );
        let response: GocardlessMandateResponse = self
            .post("/mandates", &request)
            .await
            .change_context(GocardlessError::MandateCreationFailed)?;
        tracing::info!(
            mandate_id = %response.mandates.id,
            scheme = %response.mandates.scheme,
            status = %response.mandates.status,
            "created mandate"
        );
        Ok(response.mandates)
    }

    /// Fetch a mandate, e.g. to derive the authoritative payment currency
    /// from its scheme.
    #[tracing::instrument(skip_all, fields(mandate_id = %mandate_id))]
    pub async fn get_mandate(&self, mandate_id: &str) -> CustomResult<Mandate, GocardlessError> {
        let response: GocardlessMandateResponse = self
            .get(&format!("/mandates/{mandate_id}"))
            .await
            .change_context(GocardlessError::MandateRetrieveFailed)?;
        Ok(response.mandates)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    const FALLBACK: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

    #[test]
    fn explicit_scheme_wins_over_country() {
        let params = MandateParams {
            scheme: Some(DirectDebitScheme::SepaCore),
            country_code: Some("US".to_string()),
            payer_ip_address: None,
        };
        assert_eq!(resolve_scheme(&params), DirectDebitScheme::SepaCore);
    }

    #[test]
    fn scheme_derives_from_country_when_not_explicit() {
        let params = MandateParams {
            country_code: Some("US".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_scheme(&params), DirectDebitScheme::Ach);
    }

    #[test]
    fn scheme_defaults_to_bacs() {
        assert_eq!(
            resolve_scheme(&MandateParams::default()),
            DirectDebitScheme::Bacs
        );
    }

    #[test_case(Some("203.0.113.7"), "203.0.113.7"; "valid public address passes through")]
    #[test_case(Some("127.0.0.1"), "8.8.8.8"; "loopback is substituted")]
    #[test_case(Some("localhost"), "8.8.8.8"; "hostnames are substituted")]
    #[test_case(Some("::1"), "8.8.8.8"; "ipv6 literals are substituted")]
    #[test_case(Some("999.1.2.3"), "8.8.8.8"; "out of range octets are substituted")]
    #[test_case(Some(""), "8.8.8.8"; "empty input is substituted")]
    #[test_case(None, "8.8.8.8"; "absent input is substituted")]
    fn payer_ip_resolution(supplied: Option<&str>, expected: &str) {
        let resolved = resolve_payer_ip(supplied, FALLBACK);
        assert_eq!(resolved.to_string(), expected);
    }

    #[test]
    fn ach_mandates_always_carry_a_valid_payer_ip() {
        let params = MandateParams {
            country_code: Some("US".to_string()),
            payer_ip_address: Some("127.0.0.1".to_string()),
            ..Default::default()
        };
        let request = GocardlessMandateRequest::new("BA123", &params, FALLBACK, "source");
        let value = serde_json::to_value(&request).expect("serialize");
        let sent_ip = value["mandates"]["payer_ip_address"]
            .as_str()
            .expect("payer ip present");
        assert!(sent_ip.parse::<Ipv4Addr>().is_ok());
        assert_eq!(sent_ip, "8.8.8.8");
        assert_eq!(value["mandates"]["scheme"], "ach");
    }

    #[test]
    fn non_ach_mandates_omit_the_payer_ip() {
        let params = MandateParams {
            country_code: Some("GB".to_string()),
            payer_ip_address: Some("203.0.113.7".to_string()),
            ..Default::default()
        };
        let request = GocardlessMandateRequest::new("BA123", &params, FALLBACK, "source");
        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value["mandates"].get("payer_ip_address").is_none());
        assert_eq!(value["mandates"]["scheme"], "bacs");
        assert_eq!(value["mandates"]["links"]["customer_bank_account"], "BA123");
    }
}
