//! Country-aware GoCardless bank account and mandate provisioning client.
//!
//! The provisioning sequence is strictly ordered: a provider customer is
//! created first, a customer bank account only if bank details are present,
//! and a mandate only once the bank account exists. Payments are collected
//! against an existing mandate at any later point. Each remote creation
//! carries a fresh idempotency key, so at-least-once resubmission of the same
//! logical call never duplicates provider-side resources.

pub mod bank_accounts;
pub mod client;
pub mod consts;
pub mod customers;
pub mod errors;
pub mod mandates;
pub mod payments;
pub mod rules;
pub mod settings;
pub mod webhooks;

pub use bank_accounts::{BankDetails, CustomerBankAccount};
pub use client::Gocardless;
pub use customers::{Customer, CustomerProfile};
pub use errors::{ApiError, GocardlessError};
pub use mandates::{Mandate, MandateParams};
pub use payments::{Payment, PaymentParams};
pub use settings::Settings;
pub use webhooks::{normalize_events, GocardlessWebhookEvent, NormalizedEvent, WebhookEvent};
