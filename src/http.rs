//! Shared blocking HTTP agent and response decoding.

use crate::error::LookupError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("geonews/", env!("CARGO_PKG_VERSION"));

/// Build the agent every provider client shares.
pub fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Map a ureq outcome into a decoded body or a `LookupError`.
///
/// Non-2xx statuses keep the response body so callers can log it.
pub fn decode<T: DeserializeOwned>(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, LookupError> {
    match result {
        Ok(response) => response
            .into_json::<T>()
            .map_err(|e| LookupError::InvalidResponse(e.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            debug!(status, body = %body, "upstream returned error status");
            Err(LookupError::Status { status, body })
        }
        Err(ureq::Error::Transport(t)) => Err(LookupError::Transport(t.to_string())),
    }
}

/// Join a base URL and a path without doubling the slash.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
