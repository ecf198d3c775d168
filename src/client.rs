//! HTTP request client.
//!
//! Builds requests from endpoint templates, sends them with the configured
//! timeout and renders the responses. Two output modes are offered as two
//! separate operations:
//!
//! - [`ApiClient::call`] (diagnostic mode) always produces a printable report
//!   that embeds the HTTP status, even for error statuses.
//! - [`ApiClient::fetch`] (raw mode) returns the body unchanged and turns any
//!   non-success status into [`ClientError::Request`].

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

use crate::configuration::Configuration;

/// Placeholder name -> replacement value, substituted in key order
pub type RequestParameters = BTreeMap<String, String>;

/// Ordered header list; the same name may appear more than once
pub type HeaderSet = Vec<(String, String)>;

/// Error types produced by the request client
///
/// The type is `Clone` so that a single failed login can be shared by every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Invalid base address '{address}': {reason}")]
    InvalidBaseAddress { address: String, reason: String },

    #[error("Invalid timeout: {0:?}, the timeout must be greater than zero")]
    InvalidTimeout(Duration),

    #[error("Invalid HTTP method '{0}'")]
    InvalidMethod(String),

    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    #[error("Request timeout: no response from {url} within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl ClientError {
    fn from_reqwest(error: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if error.is_timeout() {
            ClientError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}

/// Settings the client is constructed with
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_address: String,
    pub timeout: Duration,
    pub token_header_name: String,
    pub token_prefix: String,
    /// Adds the full URL and the response headers to diagnostic output
    pub verbose: bool,
}

impl ClientConfig {
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let authentication = configuration.authentication();
        Self {
            base_address: configuration.api().base_address.clone(),
            timeout: Duration::from_secs(configuration.api().timeout_seconds),
            token_header_name: authentication.token_header_name.clone(),
            token_prefix: authentication.token_prefix.clone(),
            verbose: false,
        }
    }

    pub fn with_base_address(mut self, base_address: impl Into<String>) -> Self {
        self.base_address = base_address.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Description of a single request against an endpoint template
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: String,
    path_template: String,
    parameters: RequestParameters,
    headers: HeaderSet,
    body: Option<String>,
    auth_token: Option<String>,
    requires_auth: bool,
}

impl ApiRequest {
    /// A `GET` request for the given path template
    pub fn new(path_template: impl Into<String>) -> Self {
        Self {
            method: Method::GET.to_string(),
            path_template: path_template.into(),
            parameters: RequestParameters::new(),
            headers: HeaderSet::new(),
            body: None,
            auth_token: None,
            requires_auth: false,
        }
    }

    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn parameters(mut self, parameters: RequestParameters) -> Self {
        self.parameters.extend(parameters);
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HeaderSet) -> Self {
        self.headers.extend(headers);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Require authentication and present `token` with the configured header
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self.requires_auth = true;
        self
    }

    /// The path with every known placeholder substituted
    pub fn path(&self) -> String {
        substitute_path(&self.path_template, &self.parameters)
    }
}

/// Response as received, before any formatting
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    /// Diagnostic report: status line, optional URL and headers, then the body
    pub fn render(&self, verbose: bool) -> String {
        let mut output = format!(
            "Status: {} {}\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or_default()
        );

        if verbose {
            let _ = writeln!(output, "Full URL: {}", self.url);
            output.push_str("Headers:\n");
            for name in self.headers.keys() {
                let values: Vec<String> = self
                    .headers
                    .get_all(name)
                    .iter()
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                    .collect();
                let _ = writeln!(output, "  {}: {}", name, values.join(", "));
            }
            output.push('\n');
        }

        output.push_str("Body:\n");
        output.push_str(&self.body);
        output
    }
}

/// Diagnostic-mode result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResponse {
    pub status: u16,
    pub text: String,
}

impl FormattedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client bound to a single base address
///
/// Owns the underlying `reqwest::Client`, which is released when the last
/// clone is dropped.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client for the configured base address.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseAddress` when the base address is not
    /// an absolute `http`/`https` URL, and `ClientError::InvalidTimeout` for a
    /// zero timeout.
    pub fn new(mut config: ClientConfig) -> Result<Self, ClientError> {
        config.base_address = normalize_base_address(&config.base_address)?;
        if config.timeout.is_zero() {
            return Err(ClientError::InvalidTimeout(config.timeout));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Absolute URL for a concrete (already substituted) path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_address, path.trim_start_matches('/'))
    }

    /// Send the request in diagnostic mode.
    ///
    /// Every status code yields a report; use
    /// [`FormattedResponse::is_success`] to find out whether the call
    /// succeeded.
    pub async fn call(&self, request: &ApiRequest) -> Result<FormattedResponse, ClientError> {
        let response = self.execute(request).await?;
        Ok(FormattedResponse {
            status: response.status.as_u16(),
            text: response.render(self.config.verbose),
        })
    }

    /// Send the request in raw mode, returning the body only on success.
    ///
    /// The body is decoded as text using the response charset (UTF-8 by
    /// default); a byte order mark is consumed and invalid sequences become
    /// U+FFFD.
    pub async fn fetch(&self, request: &ApiRequest) -> Result<String, ClientError> {
        let response = self.execute(request).await?;
        if response.status.is_success() {
            Ok(response.body)
        } else {
            debug!(
                "Request to {} failed with status {}",
                response.url, response.status
            );
            Err(ClientError::Request {
                status: response.status.as_u16(),
                body: response.body,
            })
        }
    }

    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let method = parse_method(&request.method)?;
        let url = self.url(&request.path());
        let timeout = self.config.timeout;

        debug!("Sending {} request to: {}", method, url);

        let mut headers = HeaderMap::new();
        for (key, value) in &request.headers {
            let (name, value) = header_pair(key, value)?;
            debug!("Header: {} = {}", key, value.to_str().unwrap_or_default());
            headers.append(name, value);
        }

        if request.requires_auth {
            if let Some(token) = request.auth_token.as_deref().filter(|t| !t.is_empty()) {
                let value = authorization_value(&self.config.token_prefix, token);
                let (name, value) = header_pair(&self.config.token_header_name, &value)?;
                headers.insert(name, value);
            }
        }

        let mut builder = self.client.request(method.clone(), &url).headers(headers);

        if let Some(body) = request.body.as_deref().filter(|b| !b.is_empty()) {
            if accepts_body(&method) {
                debug!("Request body: {}", body);
                builder = builder
                    .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(body.to_string());
            } else {
                trace!("Ignoring request body for {} request", method);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, &url, timeout))?;

        let status = response.status();
        let headers = response.headers().clone();
        debug!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(e, &url, timeout))?;
        trace!("Raw response body: {}", body);

        Ok(ApiResponse {
            url,
            status,
            headers,
            body,
        })
    }
}

/// Replace every `{key}` in `template` with its value.
///
/// Placeholders without a matching parameter are left as they are.
pub fn substitute_path(template: &str, parameters: &RequestParameters) -> String {
    parameters
        .iter()
        .fold(template.to_string(), |path, (key, value)| {
            path.replace(&format!("{{{}}}", key), value)
        })
}

/// Parse a `Key:Value` header string, splitting on the first colon.
///
/// Returns `None` when the string contains no colon.
pub fn parse_header(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once(':')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Parse a list of `Key:Value` strings, skipping malformed entries
pub fn parse_headers<S: AsRef<str>>(raw_headers: &[S]) -> HeaderSet {
    raw_headers
        .iter()
        .filter_map(|raw| {
            let parsed = parse_header(raw.as_ref());
            if parsed.is_none() {
                debug!("Skipping malformed header \"{}\"", raw.as_ref());
            }
            parsed
        })
        .collect()
}

fn normalize_base_address(address: &str) -> Result<String, ClientError> {
    let trimmed = address.trim().trim_end_matches('/');
    let invalid = |reason: String| ClientError::InvalidBaseAddress {
        address: address.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(invalid(format!("unsupported scheme '{}'", scheme))),
    }
}

fn parse_method(method: &str) -> Result<Method, ClientError> {
    Method::from_bytes(method.trim().to_uppercase().as_bytes())
        .map_err(|_| ClientError::InvalidMethod(method.to_string()))
}

fn accepts_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn authorization_value(prefix: &str, token: &str) -> String {
    if prefix.is_empty() {
        token.to_string()
    } else {
        format!("{} {}", prefix, token)
    }
}

fn header_pair(key: &str, value: &str) -> Result<(HeaderName, HeaderValue), ClientError> {
    let name =
        HeaderName::from_bytes(key.as_bytes()).map_err(|_| ClientError::InvalidHeader(key.to_string()))?;
    let value = HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader(key.to_string()))?;
    Ok((name, value))
}
