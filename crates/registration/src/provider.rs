//! The provisioning seam the orchestrator drives.

use async_trait::async_trait;
use common_utils::errors::CustomResult;
use gocardless::{
    BankDetails, Customer, CustomerBankAccount, CustomerProfile, Gocardless, GocardlessError,
    Mandate, MandateParams,
};

/// The three sequential remote creations of the provisioning flow. Each
/// step's output id is required as the next step's input, so no parallelism
/// is possible within one customer; multiple customers may be provisioned
/// concurrently.
#[async_trait]
pub trait DirectDebitProvider: Send + Sync {
    async fn create_customer(
        &self,
        profile: &CustomerProfile,
    ) -> CustomResult<Customer, GocardlessError>;

    async fn create_bank_account(
        &self,
        provider_customer_id: &str,
        details: &BankDetails,
    ) -> CustomResult<CustomerBankAccount, GocardlessError>;

    async fn create_mandate(
        &self,
        bank_account_id: &str,
        params: &MandateParams,
    ) -> CustomResult<Mandate, GocardlessError>;
}

#[async_trait]
impl<T> DirectDebitProvider for std::sync::Arc<T>
where
    T: DirectDebitProvider,
{
    async fn create_customer(
        &self,
        profile: &CustomerProfile,
    ) -> CustomResult<Customer, GocardlessError> {
        T::create_customer(self, profile).await
    }

    async fn create_bank_account(
        &self,
        provider_customer_id: &str,
        details: &BankDetails,
    ) -> CustomResult<CustomerBankAccount, GocardlessError> {
        T::create_bank_account(self, provider_customer_id, details).await
    }

    async fn create_mandate(
        &self,
        bank_account_id: &str,
        params: &MandateParams,
    ) -> CustomResult<Mandate, GocardlessError> {
        T::create_mandate(self, bank_account_id, params).await
    }
}

#[async_trait]
impl DirectDebitProvider for Gocardless {
    async fn create_customer(
        &self,
        profile: &CustomerProfile,
    ) -> CustomResult<Customer, GocardlessError> {
        Self::create_customer(self, profile).await
    }

    async fn create_bank_account(
        &self,
        provider_customer_id: &str,
        details: &BankDetails,
    ) -> CustomResult<CustomerBankAccount, GocardlessError> {
        Self::create_bank_account(self, provider_customer_id, details).await
    }

    async fn create_mandate(
        &self,
        bank_account_id: &str,
        params: &MandateParams,
    ) -> CustomResult<Mandate, GocardlessError> {
        Self::create_mandate(self, bank_account_id, params).await
    }
}
