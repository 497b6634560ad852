//! Degradation reasons for upstream lookups.
//!
//! Every outbound call produces `Result<_, LookupError>` internally. The
//! component that made the call logs the reason and degrades to "no data";
//! nothing here is meant to reach an HTTP client as a 5xx.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The provider answered successfully but had nothing relevant.
    #[error("no results for query '{query}'")]
    NoMatch { query: String },

    /// The provider answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// Connection, TLS, or timeout failure before a status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body could not be decoded into the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LookupError {
    /// Stable reason code used in log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NoMatch { .. } => "no_match",
            Self::Status { .. } => "upstream_status",
            Self::Transport(_) => "upstream_transport",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    /// The provider could not be reached or refused the request. Logged at `error`.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Transport(_))
    }
}

/// Failures of the route-search flow.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("could not geocode {which} '{name}'")]
    Unresolved { which: &'static str, name: String },

    #[error("transit routing failed: {0}")]
    Upstream(#[from] LookupError),
}
