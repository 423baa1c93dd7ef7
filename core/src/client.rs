//! Callback-style HTTP client over a host-supplied `Transport`.
//!
//! # Design
//! Each operation is split into a pure `build_*` step that produces an
//! `HttpRequest`, one `Transport::execute` call, and a pure
//! `parse_response` step. `get` and `post` stitch the three together and
//! hand the outcome to an `FnOnce` callback, so the callback runs exactly
//! once per call: with the parsed JSON on success, or with one
//! `FetchError` otherwise.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// JSON-over-HTTP client. Holds only the transport.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
}

impl<T> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_get(&self, url: &str) -> Result<HttpRequest, FetchError> {
        validate_url(url)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        })
    }

    /// Serialize `body` as JSON and apply `headers` after the default
    /// content type, so a caller-supplied `content-type` wins.
    pub fn build_post<B>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<HttpRequest, FetchError>
    where
        B: Serialize + ?Sized,
    {
        validate_url(url)?;
        let body = serde_json::to_string(body).map_err(|e| FetchError::Serialize(e.to_string()))?;
        let mut all_headers = vec![("content-type".to_string(), "application/json".to_string())];
        all_headers.extend(
            headers
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: all_headers,
            body: Some(body),
        })
    }

    /// Map non-2xx statuses to `FetchError::Status`, then parse the body.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, FetchError> {
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                response,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl<T: Transport> HttpClient<T> {
    /// Execute a prepared request and interpret the response.
    pub fn fetch(&self, request: &HttpRequest) -> Result<Value, FetchError> {
        tracing::debug!(method = request.method.as_str(), "executing request");
        let response = self
            .transport
            .execute(request)
            .map_err(|e| FetchError::Network { message: e.message })?;
        tracing::debug!(status = response.status, "response received");
        self.parse_response(response)
    }

    pub fn get<F>(&self, url: &str, callback: F)
    where
        F: FnOnce(Result<Value, FetchError>),
    {
        let outcome = self.build_get(url).and_then(|request| self.fetch(&request));
        callback(outcome);
    }

    pub fn post<B, F>(&self, url: &str, body: &B, headers: &[(&str, &str)], callback: F)
    where
        B: Serialize + ?Sized,
        F: FnOnce(Result<Value, FetchError>),
    {
        let outcome = self
            .build_post(url, body, headers)
            .and_then(|request| self.fetch(&request));
        callback(outcome);
    }
}

fn validate_url(url: &str) -> Result<(), FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidRequest(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidRequest(format!(
            "{url}: unsupported scheme {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::transport::NetworkError;

    /// Replays one canned result and records what it was asked to send.
    struct Scripted {
        reply: Result<HttpResponse, NetworkError>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn status(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn offline() -> Self {
            Self {
                reply: Err(NetworkError::new("connection refused")),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
            self.sent.borrow_mut().push(request.clone());
            self.reply.clone()
        }
    }

    /// Run `get` and return (callback invocation count, last outcome).
    fn run_get(client: &HttpClient<Scripted>, url: &str) -> (usize, Option<Result<Value, FetchError>>) {
        let calls = Cell::new(0);
        let mut last = None;
        client.get(url, |outcome| {
            calls.set(calls.get() + 1);
            last = Some(outcome);
        });
        (calls.get(), last)
    }

    #[test]
    fn get_success_delivers_parsed_json_once() {
        let client = HttpClient::new(Scripted::status(200, r#"{"articles":[]}"#));
        let (calls, outcome) = run_get(&client, "http://localhost:3000/v2/everything?q=rust");
        assert_eq!(calls, 1);
        let value = outcome.unwrap().unwrap();
        assert_eq!(value["articles"], serde_json::json!([]));

        let sent = client.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert!(sent[0].body.is_none());
    }

    #[test]
    fn non_2xx_delivers_status_error_with_raw_response() {
        let client = HttpClient::new(Scripted::status(401, r#"{"status":"error"}"#));
        let (calls, outcome) = run_get(&client, "http://localhost:3000/v2/everything?q=rust");
        assert_eq!(calls, 1);
        let err = outcome.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Error. Status code: 401");
        assert_eq!(err.response().unwrap().status, 401);
    }

    #[test]
    fn non_2xx_body_is_not_parsed() {
        let client = HttpClient::new(Scripted::status(500, "not json at all"));
        let (_, outcome) = run_get(&client, "http://localhost:3000/");
        assert!(matches!(outcome.unwrap(), Err(FetchError::Status { status: 500, .. })));
    }

    #[test]
    fn network_failure_delivers_network_error() {
        let client = HttpClient::new(Scripted::offline());
        let (calls, outcome) = run_get(&client, "http://localhost:3000/");
        assert_eq!(calls, 1);
        let err = outcome.unwrap().unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
        assert_eq!(err.status(), Some(0));
    }

    #[test]
    fn malformed_url_fails_before_the_network() {
        let client = HttpClient::new(Scripted::status(200, "{}"));
        let (calls, outcome) = run_get(&client, "not a url");
        assert_eq!(calls, 1);
        let err = outcome.unwrap().unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
        assert!(err.response().is_none());
        assert!(client.transport().sent.borrow().is_empty());
    }

    #[test]
    fn borrowed_transport_can_be_shared() {
        let transport = Scripted::status(200, "{}");
        let first = HttpClient::new(&transport);
        let second = HttpClient::new(&transport);
        first.get("http://localhost:3000/a", |_| {});
        second.get("http://localhost:3000/b", |_| {});
        assert_eq!(transport.sent.borrow().len(), 2);
    }

    #[test]
    fn unsupported_scheme_is_rejected() {
        let client = HttpClient::new(Scripted::status(200, "{}"));
        let err = client.build_get("ftp://example.com/file").unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn malformed_json_success_body_is_observable() {
        let client = HttpClient::new(Scripted::status(200, "<html>oops</html>"));
        let (calls, outcome) = run_get(&client, "http://localhost:3000/");
        assert_eq!(calls, 1);
        assert!(matches!(outcome.unwrap(), Err(FetchError::Decode(_))));
    }

    #[test]
    fn post_serializes_body_and_applies_headers() {
        let client = HttpClient::new(Scripted::status(201, r#"{"ok":true}"#));
        let calls = Cell::new(0);
        client.post(
            "http://localhost:3000/v2/echo",
            &serde_json::json!({"title": "hello"}),
            &[("x-request-id", "42"), ("Content-Type", "application/vnd.api+json")],
            |outcome| {
                calls.set(calls.get() + 1);
                assert_eq!(outcome.unwrap()["ok"], true);
            },
        );
        assert_eq!(calls.get(), 1);

        let sent = client.transport().sent.borrow();
        let req = &sent[0];
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("x-request-id"), Some("42"));
        assert_eq!(req.header("content-type"), Some("application/vnd.api+json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "hello");
    }

    #[test]
    fn post_without_headers_defaults_to_json() {
        let client = HttpClient::new(Scripted::status(200, "{}"));
        let req = client
            .build_post("http://localhost:3000/v2/echo", &vec![1, 2, 3], &[])
            .unwrap();
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn post_to_malformed_url_reports_setup_error() {
        let client = HttpClient::new(Scripted::status(200, "{}"));
        let mut outcome = None;
        client.post("::", &serde_json::json!({}), &[], |o| outcome = Some(o));
        assert!(matches!(outcome, Some(Err(FetchError::InvalidRequest(_)))));
        assert!(client.transport().sent.borrow().is_empty());
    }
}
