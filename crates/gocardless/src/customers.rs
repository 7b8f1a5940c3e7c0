//! Provider customer creation.

use common_utils::{errors::CustomResult, pii::Email};
use error_stack::ResultExt;
use masking::{ExposeOptionInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{client::Gocardless, errors::GocardlessError};

/// Caller-supplied profile mirrored to the provider at registration time.
#[derive(Clone, Debug)]
pub struct CustomerProfile {
    /// Internal customer id, carried in resource metadata so provider-side
    /// records can be traced back.
    pub customer_id: String,
    pub email: Email,
    pub given_name: Secret<String>,
    pub family_name: Secret<String>,
    pub company_name: Option<String>,
    /// Omitted from the wire entirely when blank or whitespace.
    pub phone_number: Option<Secret<String>>,
    pub country_code: String,
    pub address_line1: Option<Secret<String>>,
    pub address_line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub postal_code: Option<Secret<String>>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GocardlessCustomerRequest {
    customers: CustomerParams,
}

#[derive(Debug, Serialize)]
struct CustomerParams {
    email: Email,
    given_name: Secret<String>,
    family_name: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<Secret<String>>,
    country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_line1: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_line2: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    metadata: CustomerMetadata,
}

/// Metadata tagging every provider customer with its internal id and the
/// originating system.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CustomerMetadata {
    pub customer_id: String,
    pub source: String,
}

impl GocardlessCustomerRequest {
    pub(crate) fn new(profile: &CustomerProfile, metadata_source: &str) -> Self {
        let phone_number = profile
            .phone_number
            .expose_option()
            .filter(|phone| !phone.trim().is_empty())
            .map(Secret::new);
        Self {
            customers: CustomerParams {
                email: profile.email.clone(),
                given_name: profile.given_name.clone(),
                family_name: profile.family_name.clone(),
                company_name: profile.company_name.clone(),
                phone_number,
                country_code: profile.country_code.clone(),
                address_line1: profile.address_line1.clone(),
                address_line2: profile.address_line2.clone(),
                city: profile.city.clone(),
                postal_code: profile.postal_code.clone(),
                region: profile.region.clone(),
                metadata: CustomerMetadata {
                    customer_id: profile.customer_id.clone(),
                    source: metadata_source.to_owned(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct GocardlessCustomerResponse {
    pub(crate) customers: Customer,
}

/// Provider customer resource.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub metadata: Option<CustomerMetadata>,
}

impl Gocardless {
    /// Create the provider-side customer record.
    ///
    /// Issues a single create call tagged with a fresh idempotency key and
    /// metadata carrying the internal customer id. Any transport or
    /// validation failure is wrapped into
    /// [`GocardlessError::CustomerCreationFailed`]; the caller decides
    /// whether to abort or continue registration without payment setup.
    #[tracing::instrument(skip_all, fields(customer_id = %profile.customer_id))]
    pub async fn create_customer(
        &self,
        profile: &CustomerProfile,
    ) -> CustomResult<Customer, GocardlessError> {
        let request = GocardlessCustomerRequest::new(profile, &self.settings.metadata_source);
        let response: GocardlessCustomerResponse = self
            .post("/customers", &request)
            .await
            .change_context(GocardlessError::CustomerCreationFailed)?;
        tracing::info!(
            provider_customer_id = %response.customers.id,
            "created provider customer"
        );
        Ok(response.customers)
    }
}
