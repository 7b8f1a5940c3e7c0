//! Webhook event normalization.
//!
//! Pure and total: no network calls, exactly one normalized record per input
//! event, input order preserved, and no panic on unrecognized actions or
//! resource types. Signature verification is the receiver's concern, not
//! handled here.

use common_enums::{EventResourceType, EventStatus, MandateStatus, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Webhook envelope as delivered by the provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GocardlessWebhookEvent {
    pub events: Vec<WebhookEvent>,
}

/// A single provider event record.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WebhookEvent {
    pub id: String,
    pub resource_type: EventResourceType,
    pub action: String,
    #[serde(default)]
    pub links: WebhookLinks,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub details: Option<WebhookDetails>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WebhookLinks {
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default)]
    pub mandate: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WebhookDetails {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An event translated into the internal status vocabulary.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NormalizedEvent {
    pub id: String,
    pub resource_type: EventResourceType,
    pub resource_id: Option<String>,
    pub status: EventStatus,
    pub message: String,
    pub created_at: Option<String>,
}

/// Normalize a batch, one output record per input event, in input order.
pub fn normalize_events(events: &[WebhookEvent]) -> Vec<NormalizedEvent> {
    events.iter().map(normalize_event).collect()
}

/// Normalize a single event via the fixed action→status lookup for its
/// resource type.
pub fn normalize_event(event: &WebhookEvent) -> NormalizedEvent {
    let status = match event.resource_type {
        EventResourceType::Payments => payment_action_status(&event.action),
        EventResourceType::Mandates => mandate_action_status(&event.action),
        EventResourceType::Unknown => None,
    };

    let message = match status {
        Some(_) => event
            .details
            .as_ref()
            .and_then(|details| details.description.clone())
            .unwrap_or_else(|| format!("{} {}", event.resource_type, event.action)),
        None => format!(
            "Unhandled {} action: {}",
            event.resource_type, event.action
        ),
    };

    NormalizedEvent {
        id: event.id.clone(),
        resource_type: event.resource_type,
        resource_id: resource_id(event),
        status: status.unwrap_or(EventStatus::Unknown),
        message,
        created_at: event.created_at.clone(),
    }
}

fn resource_id(event: &WebhookEvent) -> Option<String> {
    match event.resource_type {
        EventResourceType::Payments => event.links.payment.clone(),
        EventResourceType::Mandates => event.links.mandate.clone(),
        EventResourceType::Unknown => None,
    }
}

fn payment_action_status(action: &str) -> Option<EventStatus> {
    match action {
        "created" => Some(EventStatus::PendingSubmission),
        "submitted" => Some(EventStatus::Submitted),
        "confirmed" => Some(EventStatus::Paid),
        "paid_out" => Some(EventStatus::PaidOut),
        "failed" => Some(EventStatus::Failed),
        "cancelled" => Some(EventStatus::Cancelled),
        "charged_back" => Some(EventStatus::ChargedBack),
        _ => None,
    }
}

fn mandate_action_status(action: &str) -> Option<EventStatus> {
    match action {
        "created" => Some(EventStatus::PendingSubmission),
        "submitted" => Some(EventStatus::Submitted),
        "active" | "reinstated" => Some(EventStatus::Active),
        "failed" => Some(EventStatus::Failed),
        "cancelled" => Some(EventStatus::Cancelled),
        "expired" => Some(EventStatus::Expired),
        _ => None,
    }
}

/// Project a normalized mandate event onto the mandate status machine.
/// `None` for events that don't carry a mandate status.
pub fn mandate_status_from_event(status: EventStatus) -> Option<MandateStatus> {
    match status {
        EventStatus::PendingSubmission => Some(MandateStatus::PendingSubmission),
        EventStatus::Submitted => Some(MandateStatus::Submitted),
        EventStatus::Active => Some(MandateStatus::Active),
        EventStatus::Failed => Some(MandateStatus::Failed),
        EventStatus::Cancelled => Some(MandateStatus::Cancelled),
        EventStatus::Expired => Some(MandateStatus::Expired),
        EventStatus::Paid
        | EventStatus::PaidOut
        | EventStatus::ChargedBack
        | EventStatus::Unknown => None,
    }
}

/// Project a normalized payment event onto the payment status vocabulary.
pub fn payment_status_from_event(status: EventStatus) -> Option<PaymentStatus> {
    match status {
        EventStatus::PendingSubmission => Some(PaymentStatus::PendingSubmission),
        EventStatus::Submitted => Some(PaymentStatus::Submitted),
        EventStatus::Paid => Some(PaymentStatus::Confirmed),
        EventStatus::PaidOut => Some(PaymentStatus::PaidOut),
        EventStatus::Failed => Some(PaymentStatus::Failed),
        EventStatus::Cancelled => Some(PaymentStatus::Cancelled),
        EventStatus::ChargedBack => Some(PaymentStatus::ChargedBack),
        EventStatus::Active | EventStatus::Expired | EventStatus::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(resource_type: EventResourceType, action: &str) -> WebhookEvent {
        let links = match resource_type {
            EventResourceType::Payments => WebhookLinks {
                payment: Some("PM123".to_string()),
                mandate: None,
            },
            _ => WebhookLinks {
                payment: None,
                mandate: Some("MD123".to_string()),
            },
        };
        WebhookEvent {
            id: format!("EV_{action}"),
            resource_type,
            action: action.to_string(),
            links,
            created_at: Some("2026-08-06T10:00:00.000Z".to_string()),
            details: None,
        }
    }

    #[test]
    fn batch_is_normalized_in_input_order() {
        let events = vec![
            event(EventResourceType::Payments, "confirmed"),
            event(EventResourceType::Mandates, "active"),
            event(EventResourceType::Payments, "failed"),
        ];
        let normalized = normalize_events(&events);
        assert_eq!(normalized.len(), events.len());
        assert_eq!(normalized[0].status, EventStatus::Paid);
        assert_eq!(normalized[1].status, EventStatus::Active);
        assert_eq!(normalized[2].status, EventStatus::Failed);
        for (normalized, original) in normalized.iter().zip(&events) {
            assert_eq!(normalized.id, original.id);
        }
    }

    #[test]
    fn payment_events_resolve_their_payment_link() {
        let normalized = normalize_event(&event(EventResourceType::Payments, "confirmed"));
        assert_eq!(normalized.resource_id.as_deref(), Some("PM123"));
    }

    #[test]
    fn mandate_events_resolve_their_mandate_link() {
        let normalized = normalize_event(&event(EventResourceType::Mandates, "cancelled"));
        assert_eq!(normalized.resource_id.as_deref(), Some("MD123"));
        assert_eq!(normalized.status, EventStatus::Cancelled);
    }

    #[test]
    fn unrecognized_action_maps_to_unknown_with_the_raw_action_echoed() {
        let normalized = normalize_event(&event(EventResourceType::Payments, "surcharge_fee_debited"));
        assert_eq!(normalized.status, EventStatus::Unknown);
        assert!(normalized.message.contains("surcharge_fee_debited"));
    }

    #[test]
    fn unrecognized_resource_type_maps_to_unknown() {
        let normalized = normalize_event(&event(EventResourceType::Unknown, "created"));
        assert_eq!(normalized.status, EventStatus::Unknown);
        assert!(normalized.resource_id.is_none());
    }

    #[test]
    fn recognized_combinations_never_map_to_unknown() {
        let payment_actions = [
            "created",
            "submitted",
            "confirmed",
            "paid_out",
            "failed",
            "cancelled",
            "charged_back",
        ];
        for action in payment_actions {
            let normalized = normalize_event(&event(EventResourceType::Payments, action));
            assert_ne!(normalized.status, EventStatus::Unknown, "payments.{action}");
        }
        let mandate_actions = [
            "created",
            "submitted",
            "active",
            "reinstated",
            "failed",
            "cancelled",
            "expired",
        ];
        for action in mandate_actions {
            let normalized = normalize_event(&event(EventResourceType::Mandates, action));
            assert_ne!(normalized.status, EventStatus::Unknown, "mandates.{action}");
        }
    }

    #[test]
    fn provider_description_is_preferred_for_recognized_events() {
        let mut with_details = event(EventResourceType::Mandates, "active");
        with_details.details = Some(WebhookDetails {
            origin: Some("gocardless".to_string()),
            cause: Some("mandate_activated".to_string()),
            description: Some("The mandate has become active.".to_string()),
        });
        let normalized = normalize_event(&with_details);
        assert_eq!(normalized.message, "The mandate has become active.");
    }

    #[test]
    fn envelope_deserializes_from_provider_payload() {
        let payload = serde_json::json!({
            "events": [
                {
                    "id": "EV001",
                    "resource_type": "payments",
                    "action": "confirmed",
                    "links": { "payment": "PM123" },
                    "created_at": "2026-08-06T10:00:00.000Z",
                },
                {
                    "id": "EV002",
                    "resource_type": "subscriptions",
                    "action": "created",
                },
            ]
        });
        let envelope: GocardlessWebhookEvent =
            serde_json::from_value(payload).expect("deserialize");
        let normalized = normalize_events(&envelope.events);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].status, EventStatus::Paid);
        assert_eq!(normalized[1].status, EventStatus::Unknown);
    }

    #[test]
    fn mandate_event_statuses_project_onto_the_status_machine() {
        assert_eq!(
            mandate_status_from_event(EventStatus::Active),
            Some(MandateStatus::Active)
        );
        assert_eq!(mandate_status_from_event(EventStatus::Paid), None);
        assert_eq!(
            payment_status_from_event(EventStatus::Paid),
            Some(PaymentStatus::Confirmed)
        );
        assert_eq!(payment_status_from_event(EventStatus::Active), None);
    }
}
