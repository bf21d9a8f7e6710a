// src/error.rs
//
// Failure taxonomy for the resolve-and-aggregate pipeline. Every outbound
// call and every validation step maps onto exactly one of these variants,
// so callers can tell a client mistake (unknown coin) from an upstream
// outage, and a retryable throttle from genuinely broken data.

use std::fmt;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Everything that can go wrong between receiving a query and returning
/// an `AggregatedResult`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// A required outbound call failed at the transport level or returned
    /// a non-success status. Not retried; surfaced as a server failure.
    UpstreamUnavailable(String),
    /// The catalog payload was not a sequence of coin records.
    UpstreamMalformed(String),
    /// No catalog entry matched the normalized query. Client-facing
    /// not-found, never a server error.
    CoinNotFound,
    /// The history provider signaled throttling. Retryable by the caller
    /// after a delay; must not be folded into `IncompleteUpstreamData`.
    RateLimited,
    /// Market or history payload lacked required fields for the resolved
    /// coin, for a reason other than rate-limiting.
    IncompleteUpstreamData(String),
}

impl FetchError {
    /// HTTP status the server layer maps this failure to.
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::CoinNotFound => 404,
            FetchError::RateLimited => 429,
            FetchError::UpstreamUnavailable(_)
            | FetchError::UpstreamMalformed(_)
            | FetchError::IncompleteUpstreamData(_) => 500,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::UpstreamUnavailable(detail) => {
                write!(f, "upstream unavailable: {}", detail)
            }
            FetchError::UpstreamMalformed(detail) => {
                write!(f, "upstream returned malformed payload: {}", detail)
            }
            FetchError::CoinNotFound => write!(f, "cryptocurrency not found"),
            FetchError::RateLimited => {
                write!(f, "rate limit exceeded, please try again later")
            }
            FetchError::IncompleteUpstreamData(detail) => {
                write!(f, "incomplete data from upstream: {}", detail)
            }
        }
    }
}

impl std::error::Error for FetchError {}
