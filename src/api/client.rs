//! The QCS API client: base URL resolution, token lifecycle and the
//! per-verb request surface.

use crate::config::Config;
use crate::constants::{DEFAULT_PASSWORD, DEFAULT_USERNAME, QCS_TOKEN_PATH};
use crate::error::ApiError;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::handlers::{ApiResponse, HandlerOutput, ResponseHandler};
use super::urls::{join_endpoint, resolve_base_url};

/// Per-request transport options, passed through to the underlying
/// transport verbatim.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    /// Extra request headers. Merged with the computed authorization
    /// header; on conflict the computed header wins (see
    /// [`Client::request`]).
    pub headers: HeaderMap,
    /// Query string parameters, appended to the request URL
    pub query: Vec<(String, String)>,
    /// Per-request timeout override
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request header. Invalid names or values are ignored with a
    /// warning rather than failing the whole request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            name.parse::<reqwest::header::HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!("Ignoring invalid header: {name}"),
        }
        self
    }

    /// Adds a query string parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Sets a per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Wire shape of a successful token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Builder for [`Client`]. Construction performs no network I/O; use
/// [`ClientBuilder::authenticate`] to build and log in as one step.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    response_handler: Option<ResponseHandler>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Sets the response handler applied to every request the client
    /// issues. Defaults to [`ResponseHandler::CodeCheck`], so HTTP
    /// failures surface as errors rather than being silently returned.
    pub fn response_handler(mut self, handler: ResponseHandler) -> Self {
        self.response_handler = Some(handler);
        self
    }

    /// Supplies the base URL verbatim, bypassing configuration-based
    /// resolution entirely.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Overrides the HTTP timeout from the configuration
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client. Resolves the base URL from `config` unless one
    /// was supplied explicitly; captures credentials from `config` for
    /// later logins. No network I/O happens here.
    ///
    /// # Returns
    /// * `Ok(Client)` - Constructed, unauthenticated client
    /// * `Err(ApiError::BaseUrlNotFound)` - No explicit URL and no
    ///   `hostname` in configuration, or an empty URL was supplied
    /// * `Err(ApiError::Config)` - The base URL is not a valid URL
    pub fn build(self, config: &Config) -> Result<Client, ApiError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => resolve_base_url(&config.qcs)?,
        };

        // Resolution can never produce an empty URL, but an explicitly
        // supplied one can be empty.
        if base_url.is_empty() {
            return Err(ApiError::base_url_not_found(
                "No base URL was supplied to the client either explicitly \
                 or through the configuration",
            ));
        }

        url::Url::parse(&base_url)
            .map_err(|e| ApiError::config_error(format!("Invalid base URL '{base_url}': {e}")))?;

        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.http_timeout_seconds));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Client {
            base_url,
            token: None,
            response_handler: self.response_handler.unwrap_or_default(),
            username: config
                .qcs
                .username
                .clone()
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: config
                .qcs
                .password
                .clone()
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            http,
        })
    }

    /// Builds the client and immediately performs the login round-trip.
    /// A login failure fails construction; there is no partially
    /// authenticated client on that path.
    pub async fn authenticate(self, config: &Config) -> Result<Client, ApiError> {
        let mut client = self.build(config)?;
        client.login().await?;
        Ok(client)
    }
}

/// A client for interacting with the QCS API.
///
/// Owns the resolved base URL, the authentication token lifecycle and the
/// per-verb request surface. Every request's raw transport result is piped
/// through the client's [`ResponseHandler`] before being returned, so the
/// shape of the returned [`HandlerOutput`] depends on which handler the
/// client was built with.
///
/// The client issues one request at a time and holds no internal
/// synchronization; sharing one instance across tasks requires an external
/// lock around the token lifecycle (`login`/`logout` take `&mut self`, so
/// safe Rust already rules out the unsynchronized race).
///
/// # Example
/// ```no_run
/// use qcs_client::api::Client;
/// use qcs_client::config::Config;
///
/// # async fn run() -> Result<(), qcs_client::error::ApiError> {
/// let config = Config::load().await?;
/// let mut client = Client::authenticated(&config).await?;
/// let scans = client.get("scans/", Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    base_url: String,
    token: Option<String>,
    response_handler: ResponseHandler,
    username: String,
    password: String,
    http: reqwest::Client,
}

impl Client {
    /// Returns a builder for customized construction
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Constructs an unauthenticated client with the default
    /// [`ResponseHandler::CodeCheck`] handler and the base URL resolved
    /// from `config`. Performs no network I/O.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        ClientBuilder::default().build(config)
    }

    /// Constructs a client and performs the login round-trip before
    /// returning it. This is the common path for test sessions that expect
    /// a ready-to-use authenticated client.
    pub async fn authenticated(config: &Config) -> Result<Self, ApiError> {
        ClientBuilder::default().authenticate(config).await
    }

    /// The client's current base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Points the client at a different base URL. Subsequent endpoints
    /// resolve against the new value; the held token is kept as-is.
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into();
    }

    /// The currently held authentication token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The response handler this client applies to every request
    pub fn response_handler(&self) -> &ResponseHandler {
        &self.response_handler
    }

    /// Replaces the response handler for subsequent requests
    pub fn set_response_handler(&mut self, handler: ResponseHandler) {
        self.response_handler = handler;
    }

    /// Logs in to the server to receive an authorization token.
    ///
    /// Sends the configured credentials to the token endpoint as a JSON
    /// body. The login response is always status-validated and decoded,
    /// independent of the client's configured response handler; an Echo
    /// client therefore still gets an error (and no token) on a failed
    /// login. On success the token is stored on the client and the raw
    /// response is returned for inspection.
    ///
    /// A failed login leaves the previously held token, if any, unchanged.
    #[instrument(skip(self))]
    pub async fn login(&mut self) -> Result<ApiResponse, ApiError> {
        let url = join_endpoint(&self.base_url, QCS_TOKEN_PATH);
        info!("Logging in to {url}");

        let body = serde_json::json!({
            "username": self.username,
            "password": self.password,
        });
        // The token endpoint is authentication-free; a held token (e.g. on
        // re-login) is never presented to it.
        let response = self
            .send(Method::POST, &url, RequestOptions::default(), Some(&body), None)
            .await?;

        response.error_for_status()?;
        let decoded: TokenResponse = response.json()?;
        self.token = Some(decoded.token);
        debug!("Login succeeded, token stored");
        Ok(response)
    }

    /// Starts sending unauthorized requests.
    ///
    /// Purely local: the held token is cleared and no network call is
    /// made. The effect is observed on the next request, which will omit
    /// the authorization header.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Sends an HTTP GET request to an endpoint under the base URL
    pub async fn get(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<HandlerOutput, ApiError> {
        let url = join_endpoint(&self.base_url, endpoint);
        self.request(Method::GET, &url, options).await
    }

    /// Sends an HTTP HEAD request to an endpoint under the base URL
    pub async fn head(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<HandlerOutput, ApiError> {
        let url = join_endpoint(&self.base_url, endpoint);
        self.request(Method::HEAD, &url, options).await
    }

    /// Sends an HTTP OPTIONS request to an endpoint under the base URL
    pub async fn options(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<HandlerOutput, ApiError> {
        let url = join_endpoint(&self.base_url, endpoint);
        self.request(Method::OPTIONS, &url, options).await
    }

    /// Sends an HTTP DELETE request to an endpoint under the base URL
    pub async fn delete(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<HandlerOutput, ApiError> {
        let url = join_endpoint(&self.base_url, endpoint);
        self.request(Method::DELETE, &url, options).await
    }

    /// Sends an HTTP POST request with `payload` serialized as the JSON
    /// request body
    pub async fn post<P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
        options: RequestOptions,
    ) -> Result<HandlerOutput, ApiError> {
        let url = join_endpoint(&self.base_url, endpoint);
        let body = serde_json::to_value(payload)?;
        let response = self
            .send(Method::POST, &url, options, Some(&body), self.token.as_deref())
            .await?;
        self.response_handler.handle(response)
    }

    /// Sends an HTTP PUT request with `payload` serialized as the JSON
    /// request body
    pub async fn put<P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
        options: RequestOptions,
    ) -> Result<HandlerOutput, ApiError> {
        let url = join_endpoint(&self.base_url, endpoint);
        let body = serde_json::to_value(payload)?;
        let response = self
            .send(Method::PUT, &url, options, Some(&body), self.token.as_deref())
            .await?;
        self.response_handler.handle(response)
    }

    /// Sends a request to an absolute URL, funneling the result through
    /// the configured response handler.
    ///
    /// Header merge is deterministic: caller-supplied headers are applied
    /// first, then the computed `Authorization: Token <token>` header (when
    /// a token is held) overrides any caller-supplied authorization. To
    /// send unauthenticated, call [`Client::logout`] first.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HandlerOutput, ApiError> {
        let response = self
            .send(method, url, options, None, self.token.as_deref())
            .await?;
        self.response_handler.handle(response)
    }

    /// Issues one transport call and snapshots the raw result. `token`,
    /// when supplied, is injected as the authorization header; the login
    /// path passes `None`. Failure conditions here are exactly those of
    /// the transport; handler validation happens in the callers.
    #[instrument(skip_all, fields(method = %method, url = %url))]
    async fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
        json: Option<&serde_json::Value>,
        token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        debug!("Sending {method} request to {url}");

        let mut request = self.http.request(method, url);

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        request = request.headers(options.headers);
        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Token {token}")) {
                Ok(value) => request = request.header(AUTHORIZATION, value),
                Err(_) => {
                    return Err(ApiError::config_error(
                        "Held token is not a valid header value",
                    ));
                }
            }
        }

        if let Some(body) = json {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request failed for URL {url}: {e}");
                return if e.is_timeout() {
                    Err(ApiError::network_timeout(url))
                } else if e.is_connect() {
                    Err(ApiError::network_connection(url, e.to_string()))
                } else {
                    Err(ApiError::Transport(e))
                };
            }
        };

        debug!("Response status: {}", response.status());
        ApiResponse::from_reqwest(response).await
    }
}
