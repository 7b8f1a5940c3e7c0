//! Provider API constants.

use std::net::Ipv4Addr;

/// Pinned GoCardless API version.
pub const GOCARDLESS_VERSION: &str = "2015-07-06";

/// Header carrying the pinned API version.
pub const GOCARDLESS_VERSION_HEADER: &str = "GoCardless-Version";

/// Header carrying the per-call idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Base URL of the sandbox environment.
pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.gocardless.com";

/// Base URL of the live environment.
pub const LIVE_BASE_URL: &str = "https://api.gocardless.com";

/// Bound on the duration of a single remote call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Substituted as the payer IP on ACH mandates when the caller-supplied
/// address is absent, loopback, or not a dotted-quad IPv4 literal.
pub const DEFAULT_FALLBACK_PAYER_IP: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

/// Default value of the metadata `source` tag stamped on created resources.
pub const DEFAULT_METADATA_SOURCE: &str = "customer_registration";

/// Provider-imposed maximum length of a payment reference.
pub const MAX_PAYMENT_REFERENCE_LENGTH: usize = 10;
