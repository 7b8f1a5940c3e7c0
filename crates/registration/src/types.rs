//! Registration request and outcome types.

use common_enums::MandateStatus;
use gocardless::{BankDetails, CustomerProfile};
use serde::Serialize;

/// One inbound registration to process.
#[derive(Clone, Debug)]
pub struct RegistrationRequest {
    pub profile: CustomerProfile,
    /// Absent entirely ⇒ bank provisioning is skipped, never an error.
    pub bank_details: Option<BankDetails>,
    /// Origin address of the registering client, forwarded to ACH mandate
    /// creation when present.
    pub payer_ip_address: Option<String>,
}

impl RegistrationRequest {
    /// Build a request, minting the internal customer id when the caller has
    /// not assigned one yet.
    pub fn new(
        mut profile: CustomerProfile,
        bank_details: Option<BankDetails>,
        payer_ip_address: Option<String>,
    ) -> Self {
        if profile.customer_id.trim().is_empty() {
            profile.customer_id = common_utils::generate_id_with_default_len("cus");
        }
        Self {
            profile,
            bank_details,
            payer_ip_address,
        }
    }
}

/// The step of the provisioning sequence at which a degradation occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProvisioningStage {
    Customer,
    BankAccount,
    Mandate,
}

/// Typed result of the payment provisioning part of a registration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum PaymentSetupStatus {
    /// Customer, bank account and mandate all created.
    Complete,
    /// No bank details were supplied; nothing was attempted.
    Skipped,
    /// Provisioning stopped at `stage`; registration continues and setup can
    /// be completed later.
    Degraded {
        stage: ProvisioningStage,
        reason: String,
    },
}

/// Result of a fire-and-forget collaborator call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorStatus {
    Delivered,
    Failed,
    Skipped,
}

/// Everything a caller needs to know about one processed registration.
#[derive(Clone, Debug, Serialize)]
pub struct RegistrationOutcome {
    pub provider_customer_id: Option<String>,
    pub bank_account_id: Option<String>,
    pub mandate_id: Option<String>,
    pub mandate_status: Option<MandateStatus>,
    pub payment_setup: PaymentSetupStatus,
    pub welcome_notification: CollaboratorStatus,
    pub billing_sync: CollaboratorStatus,
}

impl RegistrationOutcome {
    pub(crate) fn new() -> Self {
        Self {
            provider_customer_id: None,
            bank_account_id: None,
            mandate_id: None,
            mandate_status: None,
            payment_setup: PaymentSetupStatus::Skipped,
            welcome_notification: CollaboratorStatus::Skipped,
            billing_sync: CollaboratorStatus::Skipped,
        }
    }

    /// Whether follow-up ("complete setup later") is required.
    pub fn is_degraded(&self) -> bool {
        matches!(self.payment_setup, PaymentSetupStatus::Degraded { .. })
    }
}
