//! Error kinds surfaced by the provisioning client.

/// Transport-level outcome of a single remote call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed from the settings.
    #[error("failed to construct the HTTP client")]
    ClientConstructionFailed,

    /// The bounded per-call timeout expired. Retryable with the same
    /// idempotency key.
    #[error("request to the provider timed out")]
    Timeout,

    /// Network-level failure or a provider-side 5xx. Retryable with the same
    /// idempotency key.
    #[error("failed to reach the provider")]
    Transport,

    /// The referenced remote resource does not exist.
    #[error("requested resource does not exist with the provider")]
    NotFound,

    /// The provider returned a 4xx with a structured error body.
    #[error("provider rejected the request ({status_code}): {reason}")]
    Rejected {
        /// HTTP status of the rejection
        status_code: u16,
        /// Provider error message with field-level reasons joined
        reason: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to deserialize the provider response")]
    ResponseDeserializationFailed,
}

impl ApiError {
    /// Whether resending the same logical call (same idempotency key) is a
    /// reasonable recovery.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport)
    }
}

/// Operation-level error kinds. Each wraps the underlying [`ApiError`] or
/// validation failure in its report chain.
#[derive(Debug, thiserror::Error)]
pub enum GocardlessError {
    #[error("provider customer creation failed")]
    CustomerCreationFailed,

    #[error("bank account creation failed")]
    BankAccountCreationFailed,

    #[error("mandate creation failed")]
    MandateCreationFailed,

    #[error("mandate lookup failed")]
    MandateRetrieveFailed,

    #[error("payment creation failed")]
    PaymentCreationFailed,

    #[error("payment lookup failed")]
    PaymentRetrieveFailed,
}
