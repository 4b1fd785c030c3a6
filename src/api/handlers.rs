//! Response handling strategies.
//!
//! Separating "did the verb succeed as transport" from "was the status
//! acceptable" from "was the payload usable" lets the same request path
//! serve raw inspection, strict validation, and convenience decoding
//! without three copies of the request logic.

use crate::error::ApiError;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fmt;
use std::sync::Arc;

/// An owned snapshot of a raw transport result: status, headers, final URL
/// and body text. This is what response handlers operate on.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: String,
    body: String,
}

impl ApiResponse {
    /// Builds a response from its parts. Public so tests and custom
    /// handlers can construct synthetic responses.
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        url: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        ApiResponse {
            status,
            headers,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Consumes a live reqwest response, reading the body to completion.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self, ApiError> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response.text().await?;
        Ok(ApiResponse {
            status,
            headers,
            url,
            body,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The URL the response was received from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The response body as text
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the response body as JSON into the requested type.
    ///
    /// # Returns
    /// * `Ok(T)` - Successfully decoded body
    /// * `Err(ApiError::BodyDecode)` - Body is not valid JSON for `T`
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::body_decode(&self.url, e.to_string()))
    }

    /// Fails with an `HttpStatus` error when the status is in the 4xx or
    /// 5xx range, carrying the status and the raw body.
    pub fn error_for_status(&self) -> Result<(), ApiError> {
        if self.status.is_client_error() || self.status.is_server_error() {
            return Err(ApiError::http_status(
                self.status.as_u16(),
                &self.url,
                &self.body,
            ));
        }
        Ok(())
    }
}

/// What a response handler hands back to the caller: either the raw
/// transport result or a decoded JSON payload.
#[derive(Debug, Clone)]
pub enum HandlerOutput {
    Raw(ApiResponse),
    Json(serde_json::Value),
}

impl HandlerOutput {
    /// The raw response, if this output carries one
    pub fn as_raw(&self) -> Option<&ApiResponse> {
        match self {
            HandlerOutput::Raw(response) => Some(response),
            HandlerOutput::Json(_) => None,
        }
    }

    /// Consumes the output, yielding the raw response if present
    pub fn into_raw(self) -> Option<ApiResponse> {
        match self {
            HandlerOutput::Raw(response) => Some(response),
            HandlerOutput::Json(_) => None,
        }
    }

    /// The decoded payload, if this output carries one
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            HandlerOutput::Json(value) => Some(value),
            HandlerOutput::Raw(_) => None,
        }
    }

    /// Consumes the output, yielding the decoded payload if present
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            HandlerOutput::Json(value) => Some(value),
            HandlerOutput::Raw(_) => None,
        }
    }
}

/// Signature for user-supplied handler strategies
pub type HandlerFn = dyn Fn(ApiResponse) -> Result<HandlerOutput, ApiError> + Send + Sync;

/// Strategy deciding how a raw transport result is turned into the value
/// returned to the caller. Fixed per client instance; a client built with
/// one handler applies it to every request it issues.
#[derive(Clone, Default)]
pub enum ResponseHandler {
    /// Returns the raw response unchanged, unconditionally. Never fails.
    /// This is the mechanism for inspecting error responses
    /// programmatically instead of having them raised.
    Echo,
    /// Fails with `HttpStatus` on 4xx/5xx, otherwise returns the raw
    /// response unchanged. The safe default.
    #[default]
    CodeCheck,
    /// Like `CodeCheck`, but additionally decodes the body as JSON and
    /// returns the parsed value; decode failures are `BodyDecode` errors.
    DecodedCodeCheck,
    /// A caller-supplied strategy with the same contract as the named ones.
    Custom(Arc<HandlerFn>),
}

impl ResponseHandler {
    /// Applies the strategy to a raw transport result.
    pub fn handle(&self, response: ApiResponse) -> Result<HandlerOutput, ApiError> {
        match self {
            ResponseHandler::Echo => Ok(HandlerOutput::Raw(response)),
            ResponseHandler::CodeCheck => {
                response.error_for_status()?;
                Ok(HandlerOutput::Raw(response))
            }
            ResponseHandler::DecodedCodeCheck => {
                response.error_for_status()?;
                let value = response.json()?;
                Ok(HandlerOutput::Json(value))
            }
            ResponseHandler::Custom(handler) => handler(response),
        }
    }
}

impl fmt::Debug for ResponseHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseHandler::Echo => write!(f, "Echo"),
            ResponseHandler::CodeCheck => write!(f, "CodeCheck"),
            ResponseHandler::DecodedCodeCheck => write!(f, "DecodedCodeCheck"),
            ResponseHandler::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
