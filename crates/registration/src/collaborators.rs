//! Notification and billing collaborator seams.
//!
//! Both are fire-and-forget from the registration's point of view: the
//! orchestrator records their outcome but a failure never blocks or rolls
//! back the core registration transaction.

use async_trait::async_trait;
use common_utils::errors::CustomResult;
use gocardless::{CustomerProfile, Mandate};

/// Failure of the messaging collaborator (OpenPhone-equivalent).
#[derive(Debug, thiserror::Error)]
#[error("welcome notification dispatch failed")]
pub struct NotificationError;

/// Failure of the billing collaborator (Zoho-equivalent).
#[derive(Debug, thiserror::Error)]
#[error("billing customer sync failed")]
pub struct BillingError;

/// Sends the post-registration welcome message.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send_welcome(
        &self,
        profile: &CustomerProfile,
        mandate: Option<&Mandate>,
    ) -> CustomResult<(), NotificationError>;
}

/// Mirrors the registered customer into the billing system so invoices can
/// reference the mandate/payment ids later.
#[async_trait]
pub trait BillingService: Send + Sync {
    async fn register_customer(
        &self,
        profile: &CustomerProfile,
        provider_customer_id: &str,
    ) -> CustomResult<(), BillingError>;
}
