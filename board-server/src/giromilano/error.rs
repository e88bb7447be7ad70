//! Upstream fetch error taxonomy.

/// Failure classes for one fetch of the stop endpoint.
///
/// Classification happens at the client so the poll coordinator can pick
/// a policy per class without inspecting HTTP details. Every variant is
/// recoverable; retry policy lives entirely in the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS, or timeout failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 429 from the upstream rate limiter.
    #[error("rate limited by the GiroMilano API")]
    RateLimited,

    /// HTTP 404: the stop id is unknown upstream.
    #[error("stop not found")]
    StopNotFound,

    /// Any other non-success response, including HTML error pages that
    /// the protection layer serves with a 200 status.
    #[error("upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Body received but not decodable as the expected structure. The
    /// first part of the body is retained for diagnosis.
    #[error("malformed payload: {message}")]
    Malformed {
        message: String,
        body: Option<String>,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}
