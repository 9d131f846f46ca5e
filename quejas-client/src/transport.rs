//! HTTP Transport
//!
//! The seam between the client adapter and the network. The reqwest
//! implementation is used at runtime; the mock implementation scripts
//! responses and records every request for tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

pub use reqwest::{Method, Url};

/// Outgoing request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document
    Json(Value),
    /// Raw bytes with an explicit content type
    Bytes { content_type: String, data: Vec<u8> },
}

/// A fully resolved request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a body
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Header value, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query parameter value
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// JSON body, if any
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Some(RequestBody::Json(v)) => Some(v),
            _ => None,
        }
    }
}

/// A received response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.body.is_empty() {
            return serde_json::from_value(Value::Null);
        }
        serde_json::from_slice(&self.body)
    }

    /// Body as lossy UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a request. Any response, whatever its status, is `Ok`.
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeout
    pub fn new(timeout_secs: u64) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClientError::config(format!("HTTP client error: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let mut builder = self.client.request(request.method, request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Bytes { content_type, data }) => {
                builder.header("Content-Type", content_type).body(data)
            }
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                ClientError::request(e.to_string())
            } else {
                ClientError::transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

// ============================================================================
// Mock Transport for Testing
// ============================================================================

#[derive(Debug, Clone)]
enum MockReply {
    Response(HttpResponse),
    Failure(String),
}

struct MockRoute {
    method: Method,
    /// Either a path (`/complaints`) or an absolute URL without query
    target: String,
    queued: VecDeque<MockReply>,
    fallback: Option<MockReply>,
}

impl MockRoute {
    fn matches(&self, request: &HttpRequest) -> bool {
        if self.method != request.method {
            return false;
        }
        if self.target.starts_with("http://") || self.target.starts_with("https://") {
            let mut url = request.url.clone();
            url.set_query(None);
            url.as_str() == self.target
        } else {
            request.url.path() == self.target
        }
    }
}

type RequestObserver = Box<dyn Fn(&HttpRequest) + Send + Sync>;

/// Scripted transport recording every request
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<MockRoute>>,
    requests: Mutex<Vec<HttpRequest>>,
    observer: Mutex<Option<RequestObserver>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create wrapped in an `Arc` for sharing with a client
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn with_route<F: FnOnce(&mut MockRoute)>(&self, method: Method, target: &str, f: F) {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == method && r.target == target)
        {
            f(route);
            return;
        }
        let mut route = MockRoute {
            method,
            target: target.to_string(),
            queued: VecDeque::new(),
            fallback: None,
        };
        f(&mut route);
        routes.push(route);
    }

    /// Answer every matching request with this response
    pub fn on(&self, method: Method, target: &str, status: u16, body: Value) {
        let reply = MockReply::Response(HttpResponse::json(status, &body));
        self.with_route(method, target, |r| r.fallback = Some(reply));
    }

    /// Answer the next matching request with this response
    pub fn once(&self, method: Method, target: &str, status: u16, body: Value) {
        let reply = MockReply::Response(HttpResponse::json(status, &body));
        self.with_route(method, target, |r| r.queued.push_back(reply));
    }

    /// Fail the next matching request without a response
    pub fn fail_once(&self, method: Method, target: &str, message: &str) {
        let reply = MockReply::Failure(message.to_string());
        self.with_route(method, target, |r| r.queued.push_back(reply));
    }

    /// Run a callback as each request arrives, before it is answered
    pub fn set_observer<F>(&self, observer: F)
    where
        F: Fn(&HttpRequest) + Send + Sync + 'static,
    {
        *self.observer.lock().unwrap_or_else(|e| e.into_inner()) = Some(Box::new(observer));
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of requests received for a method and path
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|r| r.method == method && r.url.path() == path)
            .count()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Forget recorded requests, keeping routes
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        if let Some(observer) = self.observer.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            observer(&request);
        }

        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let reply = {
            let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
            routes
                .iter_mut()
                .find(|r| r.matches(&request))
                .and_then(|r| r.queued.pop_front().or_else(|| r.fallback.clone()))
        };

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Failure(message)) => Err(ClientError::transport(message)),
            None => Ok(HttpResponse::json(
                404,
                &serde_json::json!({
                    "message": format!("No mock route for {} {}", request.method, request.url.path())
                }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(url: &str) -> HttpRequest {
        HttpRequest::new(Method::GET, Url::parse(url).unwrap())
    }

    #[tokio::test]
    async fn test_mock_queued_then_fallback() {
        let mock = MockTransport::new();
        mock.on(Method::GET, "/branches", 200, json!({"n": 1}));
        mock.once(Method::GET, "/branches", 500, json!({"message": "boom"}));

        let first = mock.send(get("http://mock.local/branches?page=1")).await.unwrap();
        assert_eq!(first.status, 500);

        let second = mock.send(get("http://mock.local/branches")).await.unwrap();
        assert_eq!(second.status, 200);
        assert_eq!(second.parse::<Value>().unwrap()["n"], 1);

        assert_eq!(mock.count(Method::GET, "/branches"), 2);
    }

    #[tokio::test]
    async fn test_mock_unmatched_route_is_404() {
        let mock = MockTransport::new();
        let response = mock.send(get("http://mock.local/nothing")).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_mock_transport_failure() {
        let mock = MockTransport::new();
        mock.fail_once(Method::GET, "/ratings", "connection refused");

        let err = mock.send(get("http://mock.local/ratings")).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_mock_absolute_url_route() {
        let mock = MockTransport::new();
        mock.on(Method::PUT, "https://bucket.example.com/quejas-siclo/a.png", 200, json!({}));

        let request = HttpRequest::new(
            Method::PUT,
            Url::parse("https://bucket.example.com/quejas-siclo/a.png?X-Amz-Signature=abc").unwrap(),
        );
        let response = mock.send(request).await.unwrap();
        assert!(response.is_success());
    }

    #[test]
    fn test_request_helpers() {
        let request = get("http://mock.local/complaints?page=2&status=PENDING")
            .with_header("Authorization", "Bearer t");

        assert_eq!(request.header("authorization"), Some("Bearer t"));
        assert_eq!(request.query_param("page").as_deref(), Some("2"));
        assert!(request.query_param("limit").is_none());
        assert!(request.json_body().is_none());
    }

    #[test]
    fn test_empty_body_parses_as_unit() {
        let response = HttpResponse::new(204, Vec::new());
        assert!(response.parse::<()>().is_ok());
        assert!(response.parse::<Option<Value>>().unwrap().is_none());
    }
}
