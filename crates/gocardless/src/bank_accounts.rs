//! Customer bank account creation.

use common_enums::{BankAccountType, BankIdentifierField, Currency};
use common_utils::{
    errors::{CustomResult, ValidationError},
    pii::AccountNumber,
};
use error_stack::{report, ResultExt};
use masking::Secret;
use serde::{Deserialize, Serialize};

use crate::{client::Gocardless, errors::GocardlessError, rules};

/// Raw bank details supplied by the caller. Not persisted by this crate.
#[derive(Clone, Debug)]
pub struct BankDetails {
    pub account_holder_name: Secret<String>,
    /// Raw national bank/sort/routing code; formatted per country before it
    /// reaches the wire.
    pub bank_code: String,
    pub account_number: Secret<String, AccountNumber>,
    /// Required whenever bank details are supplied at all.
    pub account_type: Option<BankAccountType>,
    /// Takes precedence over any customer-level country code.
    pub country_code: String,
}

impl BankDetails {
    pub(crate) fn validate(&self) -> CustomResult<(), ValidationError> {
        if self.account_type.is_none() {
            return Err(report!(ValidationError::MissingRequiredField {
                field_name: "account_type".to_string()
            }));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GocardlessBankAccountRequest {
    customer_bank_accounts: BankAccountParams,
}

#[derive(Debug, Serialize)]
struct BankAccountParams {
    account_holder_name: Secret<String>,
    account_number: Secret<String, AccountNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_type: Option<BankAccountType>,
    country_code: String,
    currency: Currency,
    links: CustomerLink,
    metadata: ResourceMetadata,
}

#[derive(Debug, Serialize)]
struct CustomerLink {
    customer: String,
}

/// Metadata `source` tag stamped on bank accounts and mandates.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResourceMetadata {
    pub source: String,
}

impl GocardlessBankAccountRequest {
    /// Build the wire payload: resolve the country rule, format the bank
    /// identifier into exactly one of `bank_code`/`branch_code`, and apply
    /// the GB account-type exception.
    pub(crate) fn try_new(
        provider_customer_id: &str,
        details: &BankDetails,
        metadata_source: &str,
    ) -> CustomResult<Self, ValidationError> {
        details.validate()?;

        let rule = rules::resolve_rule(&details.country_code);
        let identifier = rules::format_bank_identifier(&details.bank_code, &details.country_code);
        let (bank_code, branch_code) = match rule.identifier_field {
            BankIdentifierField::BankCode => (Some(identifier), None),
            BankIdentifierField::BranchCode => (None, Some(identifier)),
        };
        let account_type = rules::requires_account_type(&details.country_code)
            .then_some(details.account_type)
            .flatten();

        Ok(Self {
            customer_bank_accounts: BankAccountParams {
                account_holder_name: details.account_holder_name.clone(),
                account_number: details.account_number.clone(),
                bank_code,
                branch_code,
                account_type,
                country_code: details.country_code.trim().to_ascii_uppercase(),
                currency: rule.currency,
                links: CustomerLink {
                    customer: provider_customer_id.to_owned(),
                },
                metadata: ResourceMetadata {
                    source: metadata_source.to_owned(),
                },
            },
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct GocardlessBankAccountResponse {
    pub(crate) customer_bank_accounts: CustomerBankAccount,
}

/// Provider bank account resource, linked 1:1 to a provider customer and
/// immutable once created.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CustomerBankAccount {
    pub id: String,
    pub currency: Currency,
    #[serde(default)]
    pub account_number_ending: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Gocardless {
    /// Create a customer bank account from raw caller-supplied details.
    ///
    /// The country rule keyed on `details.country_code` picks the currency
    /// and whether the formatted identifier goes out as `bank_code` or
    /// `branch_code` — never both, since setting the unused field causes a
    /// provider-side rejection. Does not retry.
    #[tracing::instrument(skip_all, fields(provider_customer_id = %provider_customer_id))]
    pub async fn create_bank_account(
        &self,
        provider_customer_id: &str,
        details: &BankDetails,
    ) -> CustomResult<CustomerBankAccount, GocardlessError> {
        let request = GocardlessBankAccountRequest::try_new(
            provider_customer_id,
            details,
            &self.settings.metadata_source,
        )
        .change_context(GocardlessError::BankAccountCreationFailed)?;

        // The account number must never reach a log line unmasked.
        tracing::info!(
            account_number = ?details.account_number,
            country_code = %details.country_code,
            "creating customer bank account"
        );

        let response: GocardlessBankAccountResponse = self
            .post("/customer_bank_accounts", &request)
            .await
            .change_context(GocardlessError::BankAccountCreationFailed)?;
        tracing::info!(
            bank_account_id = %response.customer_bank_accounts.id,
            "created customer bank account"
        );
        Ok(response.customer_bank_accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(country_code: &str, bank_code: &str) -> BankDetails {
        BankDetails {
            account_holder_name: Secret::new("Jane Doe".to_string()),
            bank_code: bank_code.to_string(),
            account_number: Secret::new("123456789".to_string()),
            account_type: Some(BankAccountType::Checking),
            country_code: country_code.to_string(),
        }
    }

    #[test]
    fn us_accounts_use_bank_code_and_usd() {
        let request = GocardlessBankAccountRequest::try_new(
            "CU123",
            &details("US", "021000021"),
            "customer_registration",
        )
        .expect("valid details");
        let value = serde_json::to_value(&request).expect("serialize");
        let params = &value["customer_bank_accounts"];
        assert_eq!(params["bank_code"], "021000021");
        assert!(params.get("branch_code").is_none());
        assert_eq!(params["currency"], "USD");
        assert_eq!(params["account_type"], "checking");
        assert_eq!(params["links"]["customer"], "CU123");
    }

    #[test]
    fn gb_accounts_use_branch_code_and_omit_account_type() {
        let request = GocardlessBankAccountRequest::try_new(
            "CU123",
            &details("GB", "123456"),
            "customer_registration",
        )
        .expect("valid details");
        let value = serde_json::to_value(&request).expect("serialize");
        let params = &value["customer_bank_accounts"];
        assert_eq!(params["branch_code"], "123456");
        assert!(params.get("bank_code").is_none());
        assert!(params.get("account_type").is_none());
        assert_eq!(params["currency"], "GBP");
    }

    #[test]
    fn canadian_transit_numbers_are_truncated_into_the_identifier_slot() {
        let request = GocardlessBankAccountRequest::try_new(
            "CU123",
            &details("CA", "00412345678"),
            "customer_registration",
        )
        .expect("valid details");
        let value = serde_json::to_value(&request).expect("serialize");
        let params = &value["customer_bank_accounts"];
        assert_eq!(params["bank_code"], "0041");
        assert_eq!(params["currency"], "CAD");
        assert_eq!(params["account_type"], "checking");
    }

    #[test]
    fn exactly_one_identifier_field_is_ever_set() {
        for country in ["US", "CA", "AU", "NZ", "GB", "DE", "SE", "DK", "NO", "ZZ"] {
            let request = GocardlessBankAccountRequest::try_new(
                "CU123",
                &details(country, "12345678"),
                "customer_registration",
            )
            .expect("valid details");
            let value = serde_json::to_value(&request).expect("serialize");
            let params = &value["customer_bank_accounts"];
            let set_fields = usize::from(params.get("bank_code").is_some())
                + usize::from(params.get("branch_code").is_some());
            assert_eq!(set_fields, 1, "country {country}");
        }
    }

    #[test]
    fn unrecognized_country_falls_back_to_the_default_rule() {
        let request = GocardlessBankAccountRequest::try_new(
            "CU123",
            &details("ZZ", "987654"),
            "customer_registration",
        )
        .expect("valid details");
        let value = serde_json::to_value(&request).expect("serialize");
        let params = &value["customer_bank_accounts"];
        assert_eq!(params["currency"], "GBP");
        assert_eq!(params["branch_code"], "9876");
        assert!(params.get("bank_code").is_none());
    }

    #[test]
    fn missing_account_type_is_a_validation_error() {
        let mut incomplete = details("US", "021000021");
        incomplete.account_type = None;
        let result =
            GocardlessBankAccountRequest::try_new("CU123", &incomplete, "customer_registration");
        assert!(result.is_err());
    }

    #[test]
    fn account_number_is_masked_in_debug_output() {
        let details = details("US", "021000021");
        let rendered = format!("{:?}", details.account_number);
        assert_eq!(rendered, "****6789");
    }
}
