//! Error types for the news client.
//!
//! # Design
//! Every failed request ends up as exactly one `FetchError`. Status errors
//! keep the raw response so callers can still read what the server sent;
//! setup failures never reached the network and carry no response.

use thiserror::Error;

use crate::http::HttpResponse;

/// Everything that can go wrong between building a request and holding a
/// parsed JSON value.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered outside the 2xx class.
    #[error("Error. Status code: {status}")]
    Status { status: u16, response: HttpResponse },

    /// The transport failed before any response arrived.
    #[error("Error. Status code: 0 ({message})")]
    Network { message: String },

    /// The request could not be set up, e.g. a malformed URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A 2xx body was not valid JSON or did not have the expected shape.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl FetchError {
    /// The HTTP status behind this error. Network failures report 0, the
    /// way a browser request does when no response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network { .. } => Some(0),
            _ => None,
        }
    }

    /// The raw response, present only for status errors.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            FetchError::Status { response, .. } => Some(response),
            _ => None,
        }
    }
}
