//! The registration flow itself.

use common_utils::errors::ValidationError;
use gocardless::{ApiError, MandateParams};

use crate::{
    collaborators::{BillingService, NotificationService},
    provider::DirectDebitProvider,
    types::{CollaboratorStatus, PaymentSetupStatus, ProvisioningStage, RegistrationOutcome,
        RegistrationRequest},
};

/// Combines customer creation, the payment provider client, and the
/// notification collaborators into one registration transaction.
pub struct RegistrationOrchestrator<P, N, B> {
    provider: P,
    notifier: N,
    billing: B,
}

impl<P, N, B> RegistrationOrchestrator<P, N, B>
where
    P: DirectDebitProvider,
    N: NotificationService,
    B: BillingService,
{
    pub fn new(provider: P, notifier: N, billing: B) -> Self {
        Self {
            provider,
            notifier,
            billing,
        }
    }

    /// Process one registration.
    ///
    /// Infallible by design: provider rejections and validation failures
    /// degrade the outcome instead of failing it, and collaborator failures
    /// are recorded without affecting provisioning. The caller persists the
    /// outcome and can offer "complete setup later" whenever
    /// [`RegistrationOutcome::is_degraded`] holds.
    #[tracing::instrument(skip_all, fields(customer_id = %request.profile.customer_id))]
    pub async fn register(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        let mut outcome = RegistrationOutcome::new();
        let mut mandate = None;

        match self.provider.create_customer(&request.profile).await {
            Ok(customer) => {
                outcome.provider_customer_id = Some(customer.id.clone());
                if let Some(details) = &request.bank_details {
                    match self.provider.create_bank_account(&customer.id, details).await {
                        Ok(bank_account) => {
                            outcome.bank_account_id = Some(bank_account.id.clone());
                            let params = MandateParams {
                                scheme: None,
                                country_code: Some(details.country_code.clone()),
                                payer_ip_address: request.payer_ip_address.clone(),
                            };
                            match self.provider.create_mandate(&bank_account.id, &params).await {
                                Ok(created) => {
                                    outcome.mandate_id = Some(created.id.clone());
                                    outcome.mandate_status = Some(created.status);
                                    outcome.payment_setup = PaymentSetupStatus::Complete;
                                    mandate = Some(created);
                                }
                                Err(report) => {
                                    tracing::warn!(
                                        error = ?report,
                                        "mandate creation failed; registration continues degraded"
                                    );
                                    outcome.payment_setup = PaymentSetupStatus::Degraded {
                                        stage: ProvisioningStage::Mandate,
                                        reason: degradation_reason(&report),
                                    };
                                }
                            }
                        }
                        Err(report) => {
                            tracing::warn!(
                                error = ?report,
                                "bank account creation failed; registration continues degraded"
                            );
                            outcome.payment_setup = PaymentSetupStatus::Degraded {
                                stage: ProvisioningStage::BankAccount,
                                reason: degradation_reason(&report),
                            };
                        }
                    }
                }
            }
            Err(report) => {
                tracing::warn!(
                    error = ?report,
                    "provider customer creation failed; registration continues degraded"
                );
                outcome.payment_setup = PaymentSetupStatus::Degraded {
                    stage: ProvisioningStage::Customer,
                    reason: degradation_reason(&report),
                };
            }
        }

        // Collaborators run after provisioning, order-preserving but
        // failure-isolated.
        outcome.welcome_notification = match self
            .notifier
            .send_welcome(&request.profile, mandate.as_ref())
            .await
        {
            Ok(()) => CollaboratorStatus::Delivered,
            Err(report) => {
                tracing::warn!(error = ?report, "welcome notification failed");
                CollaboratorStatus::Failed
            }
        };

        outcome.billing_sync = match &outcome.provider_customer_id {
            Some(provider_customer_id) => match self
                .billing
                .register_customer(&request.profile, provider_customer_id)
                .await
            {
                Ok(()) => CollaboratorStatus::Delivered,
                Err(report) => {
                    tracing::warn!(error = ?report, "billing customer sync failed");
                    CollaboratorStatus::Failed
                }
            },
            None => CollaboratorStatus::Skipped,
        };

        outcome
    }
}

/// Extract the most specific reason available from a provisioning failure
/// for the degraded outcome.
fn degradation_reason<C>(report: &error_stack::Report<C>) -> String {
    report
        .downcast_ref::<ApiError>()
        .map(ToString::to_string)
        .or_else(|| {
            report
                .downcast_ref::<ValidationError>()
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| report.to_string())
}
