// src/error.rs
// Error taxonomy shared by the events and LLM clients.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by `EventsClient` and `LlmClient`.
///
/// Every error is raised to the immediate caller; nothing is retried,
/// logged-and-swallowed, or recovered into a partial result.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure: connection refused, timeout, DNS.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not JSON, or its shape did not match the endpoint contract.
    #[error("unexpected response from {endpoint}: {detail}")]
    ResponseFormat { endpoint: String, detail: String },

    /// A record failed schema validation; names the offending field.
    #[error("invalid field `{field}`: {detail}")]
    Validation { field: String, detail: String },

    /// Non-2xx status from a remote service, payload carried intact.
    #[error("remote service error ({status}): {detail}")]
    RemoteService {
        status: reqwest::StatusCode,
        detail: String,
    },

    /// Required credential missing from the environment.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),
}

impl Error {
    pub fn response_format(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::ResponseFormat {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    pub fn validation(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            detail: detail.into(),
        }
    }
}
