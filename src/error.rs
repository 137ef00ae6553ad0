//! Error types for modelgate

use thiserror::Error;

/// A single failed attempt in a fallback walk.
#[derive(Debug)]
pub struct AttemptFailure {
    /// Fully qualified model id that was attempted (e.g. `"xai/grok-3"`)
    pub model: String,
    /// The error the attempt produced
    pub cause: Box<Error>,
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.model, self.cause)
    }
}

fn summarize_attempts(attempts: &[AttemptFailure]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Routing/provider error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider not configured (no API key or not registered)
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// API error
    #[error("api error: {0}")]
    Api(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimit,

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Every candidate in the fallback walk failed; carries one entry per attempt
    #[error("all candidate models failed ({} attempts): {}", .0.len(), summarize_attempts(.0))]
    Exhausted(Vec<AttemptFailure>),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
