//! Client configuration.

use std::net::Ipv4Addr;

use masking::Secret;
use serde::Deserialize;

use crate::consts;

/// Connection and behavior settings for the provisioning client.
///
/// Deserializable so it can be lifted directly out of an application config
/// file; every field except the access token carries a default.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Base URL of the provider API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Read-write API access token.
    pub access_token: Secret<String>,

    /// Per-call timeout in seconds. Expiry is reported as a retryable
    /// transport failure, distinct from a provider rejection.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Public address substituted for absent, loopback, or malformed payer
    /// IPs on ACH mandates.
    #[serde(default = "default_fallback_payer_ip")]
    pub fallback_payer_ip: Ipv4Addr,

    /// Value of the metadata `source` tag stamped on created resources.
    #[serde(default = "default_metadata_source")]
    pub metadata_source: String,
}

impl Settings {
    /// Settings for the sandbox environment with defaults for everything but
    /// the token.
    pub fn new(access_token: Secret<String>) -> Self {
        Self {
            base_url: default_base_url(),
            access_token,
            request_timeout: default_request_timeout(),
            fallback_payer_ip: default_fallback_payer_ip(),
            metadata_source: default_metadata_source(),
        }
    }

    /// Switch to the live environment base URL.
    pub fn live(mut self) -> Self {
        self.base_url = consts::LIVE_BASE_URL.to_string();
        self
    }
}

fn default_base_url() -> String {
    consts::SANDBOX_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    consts::DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_fallback_payer_ip() -> Ipv4Addr {
    consts::DEFAULT_FALLBACK_PAYER_IP
}

fn default_metadata_source() -> String {
    consts::DEFAULT_METADATA_SOURCE.to_string()
}
