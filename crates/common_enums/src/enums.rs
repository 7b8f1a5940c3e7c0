//! Shared enums for the direct debit provisioning flow.

use serde::{Deserialize, Serialize};

/// The currencies supported across the direct debit schemes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Currency {
    AUD,
    CAD,
    DKK,
    EUR,
    #[default]
    GBP,
    NOK,
    NZD,
    SEK,
    USD,
}

/// A regional direct debit payment rail.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DirectDebitScheme {
    /// UK Bacs direct debit
    #[default]
    Bacs,
    /// US/CA/AU/NZ ACH-style debit
    Ach,
    /// Eurozone-and-adjacent SEPA Core direct debit
    SepaCore,
}

impl DirectDebitScheme {
    /// The authoritative settlement currency for payments collected against a
    /// mandate of this scheme. Payment creation always derives its currency
    /// from here rather than trusting caller input.
    pub fn currency(self) -> Currency {
        match self {
            Self::Ach => Currency::USD,
            Self::Bacs => Currency::GBP,
            Self::SepaCore => Currency::EUR,
        }
    }
}

/// Which provider field carries the caller-supplied bank/sort/routing code.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BankIdentifierField {
    /// National bank code / routing number slot
    BankCode,
    /// Branch code / sort code slot
    BranchCode,
}

/// The type of the customer's bank account.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BankAccountType {
    Checking,
    Savings,
}

/// Lifecycle status of a mandate.
///
/// The creation call only ever produces `PendingSubmission`; every later
/// transition is driven by webhook events.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MandateStatus {
    #[default]
    PendingSubmission,
    Submitted,
    Active,
    Failed,
    Cancelled,
    Expired,
}

impl MandateStatus {
    /// Whether no further transitions are possible from this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled | Self::Expired)
    }

    /// Whether the mandate can collect payments in this status.
    pub fn is_active_eligible(self) -> bool {
        matches!(self, Self::Submitted | Self::Active)
    }

    /// Validity of a status transition.
    ///
    /// The happy path is `pending_submission → submitted → active`; the
    /// terminal statuses are reachable from any non-terminal one.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() || self == next {
            return false;
        }
        match next {
            Self::Failed | Self::Cancelled | Self::Expired => true,
            Self::Submitted => self == Self::PendingSubmission,
            Self::Active => self == Self::Submitted,
            Self::PendingSubmission => false,
        }
    }
}

/// Lifecycle status of a payment collected against a mandate.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    PendingSubmission,
    Submitted,
    Confirmed,
    PaidOut,
    Failed,
    Cancelled,
    ChargedBack,
}

/// The resource class a webhook event refers to.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventResourceType {
    Payments,
    Mandates,
    /// Any resource class this service does not track.
    #[serde(other)]
    Unknown,
}

/// Internal status vocabulary produced by webhook normalization.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventStatus {
    PendingSubmission,
    Submitted,
    Active,
    Paid,
    PaidOut,
    ChargedBack,
    Failed,
    Cancelled,
    Expired,
    /// Action/resource combination outside the fixed lookup.
    Unknown,
}
