//! HTTP Client Adapter
//!
//! Wraps every backend call: resolves the URL, attaches the bearer
//! credential (the stored user token, or the public key when there is
//! none), logs the outcome and turns non-success statuses into
//! [`ClientError`]s carrying the backend's message. A 401 clears the
//! stored token so every later request falls back to the public key.
//! Nothing is retried.

use quejas_core::{LoginRequest, LoginResponse, Manager};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::token::{FileTokenStore, TokenStore};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, ReqwestTransport, Url};

/// Authenticated client for the backend REST API
pub struct ApiClient {
    base_url: String,
    public_api_key: String,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client over an explicit transport and token store
    pub fn new(
        config: &ClientConfig,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            public_api_key: config.public_api_key.clone(),
            transport,
            tokens,
        }
    }

    /// Create a client using reqwest and the token file under the state dir
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.http_timeout_secs)?);
        let tokens = Arc::new(FileTokenStore::new(&config.state_dir));
        Ok(Self::new(config, transport, tokens))
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying transport, for requests that bypass the API (uploads)
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        self.transport.clone()
    }

    /// Currently stored user token
    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }

    /// Store a user token; later requests use it
    pub fn set_token(&self, token: &str) {
        self.tokens.set(token);
    }

    /// Drop the user token; later requests use the public key
    pub fn clear_token(&self) {
        self.tokens.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Resolve a relative path plus query pairs into a URL
    pub fn url(&self, path: &str, query: &[(String, String)]) -> ClientResult<Url> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        let mut url = Url::parse(&joined)
            .map_err(|e| ClientError::request(format!("Invalid URL {}: {}", joined, e)))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn authorization(&self) -> String {
        match self.tokens.get() {
            Some(token) => format!("Bearer {}", token),
            None => format!("Bearer {}", self.public_api_key),
        }
    }

    /// Perform a request and return the raw JSON body
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> ClientResult<Value> {
        let url = match self.url(path, query) {
            Ok(url) => url,
            Err(e) => {
                error!(method = %method, path = path, error = %e, "Failed to build request");
                return Err(e);
            }
        };

        let mut request = HttpRequest::new(method.clone(), url)
            .with_header("Authorization", self.authorization())
            .with_header("Accept", "application/json");
        if let Some(body) = body {
            request = request.with_body(RequestBody::Json(body));
        }

        debug!(method = %method, path = path, "API request");
        let started = Instant::now();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    ClientError::Request { .. } => {
                        error!(method = %method, path = path, error = %e, "Request setup failed")
                    }
                    _ => error!(method = %method, path = path, error = %e, "No response from server"),
                }
                return Err(e);
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        debug!(
            method = %method,
            path = path,
            status = response.status,
            elapsed_ms = elapsed_ms,
            "API response"
        );

        if response.is_success() {
            return response
                .parse::<Option<Value>>()
                .map(|v| v.unwrap_or(Value::Null))
                .map_err(|e| ClientError::decode(format!("{} {}: {}", method, path, e)));
        }

        Err(self.failure(&method, path, &response))
    }

    fn failure(&self, method: &Method, path: &str, response: &HttpResponse) -> ClientError {
        let message = backend_message(response)
            .unwrap_or_else(|| format!("Request failed with status {}", response.status));

        match response.status {
            401 => {
                warn!(method = %method, path = path, "Unauthorized, clearing stored token");
                self.tokens.clear();
            }
            403 => warn!(method = %method, path = path, message = %message, "Forbidden"),
            404 => warn!(method = %method, path = path, message = %message, "Resource not found"),
            500 => error!(method = %method, path = path, message = %message, "Server error"),
            status => warn!(method = %method, path = path, status = status, message = %message, "Request failed"),
        }

        ClientError::from_status(response.status, message)
    }

    /// Decode a JSON value into a typed response
    fn decode<T: DeserializeOwned>(path: &str, value: Value) -> ClientResult<T> {
        serde_json::from_value(value).map_err(|e| ClientError::decode(format!("{}: {}", path, e)))
    }

    fn encode<B: Serialize>(body: &B) -> ClientResult<Value> {
        serde_json::to_value(body).map_err(|e| ClientError::request(e.to_string()))
    }

    /// GET with query pairs
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> ClientResult<T> {
        let value = self.send_json(Method::GET, path, query, None).await?;
        Self::decode(path, value)
    }

    /// POST a JSON body
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let body = Self::encode(body)?;
        let value = self.send_json(Method::POST, path, &[], Some(body)).await?;
        Self::decode(path, value)
    }

    /// PATCH a JSON body
    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let body = Self::encode(body)?;
        let value = self.send_json(Method::PATCH, path, &[], Some(body)).await?;
        Self::decode(path, value)
    }

    /// PUT a JSON body
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let body = Self::encode(body)?;
        let value = self.send_json(Method::PUT, path, &[], Some(body)).await?;
        Self::decode(path, value)
    }

    /// DELETE, ignoring the response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send_json(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Log in and store the returned token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Manager> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/auth/login", &request).await?;
        self.tokens.set(&response.token);
        info!(user = %response.user.email, "Logged in");
        Ok(response.user)
    }

    /// Forget the stored token
    pub fn logout(&self) {
        self.tokens.clear();
        info!("Logged out");
    }
}

/// Extract `message` (string or list) or `error` from an error body
fn backend_message(response: &HttpResponse) -> Option<String> {
    let value: Value = serde_json::from_slice(&response.body).ok()?;

    match value.get("message") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) if !items.is_empty() => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|i| i.as_str().map(String::from))
                .collect();
            if !parts.is_empty() {
                return Some(parts.join(", "));
            }
        }
        _ => {}
    }

    value
        .get("error")
        .and_then(|e| e.as_str())
        .filter(|s| !s.is_empty())
        .map(String::from)
}
