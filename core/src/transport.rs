//! The seam between the core and whatever performs HTTP for it.

use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// A failure below HTTP: connection refused, DNS, TLS, broken stream.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Executes one HTTP round-trip on behalf of `HttpClient`.
///
/// Implementations must return every received response as `Ok`, whatever
/// its status; status interpretation belongs to the client.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        (**self).execute(request)
    }
}
