use thiserror::Error;

/// Errors surfaced by the provider-facing capabilities (inventory queries
/// and metric publication). Cloneable so test doubles can replay an
/// injected failure on every call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    #[error("authentication rejected: {reason}")]
    AuthRejected { reason: String },

    #[error("rate limit exceeded: retry after {retry_after_secs}s")]
    Throttled { retry_after_secs: u64 },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    #[error("deadline exceeded after {duration_ms}ms")]
    Timeout { duration_ms: u64 },
}
