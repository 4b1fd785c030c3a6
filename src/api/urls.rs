//! Base URL resolution and endpoint joining.

use crate::config::QcsConfig;
use crate::constants::{QCS_API_VERSION, QCS_CONFIG_SECTION};
use crate::error::ApiError;

/// Resolves the client's base URL from the server configuration section.
///
/// The scheme follows the `https` flag, the network location is
/// `hostname:port` when a port is configured and the bare hostname
/// otherwise, and the versioned API path prefix is always appended.
///
/// # Arguments
/// * `qcs` - The server connection section of the configuration
///
/// # Returns
/// * `Ok(String)` - The resolved base URL
/// * `Err(ApiError::BaseUrlNotFound)` - No hostname present in configuration
///
/// # Example
/// ```
/// use qcs_client::config::QcsConfig;
/// use qcs_client::api::resolve_base_url;
///
/// let qcs = QcsConfig {
///     hostname: Some("qcs.example.com".to_string()),
///     port: Some(8443),
///     https: true,
///     ..QcsConfig::default()
/// };
/// let url = resolve_base_url(&qcs).unwrap();
/// assert_eq!(url, "https://qcs.example.com:8443/api/v1/");
/// ```
pub fn resolve_base_url(qcs: &QcsConfig) -> Result<String, ApiError> {
    let hostname = qcs
        .hostname
        .as_deref()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| {
            ApiError::base_url_not_found(format!(
                "'{QCS_CONFIG_SECTION}' section present in configuration, but no 'hostname' key found"
            ))
        })?;

    let scheme = if qcs.https { "https" } else { "http" };
    let netloc = match qcs.port {
        Some(port) => format!("{hostname}:{port}"),
        None => hostname.to_string(),
    };

    Ok(format!("{scheme}://{netloc}/{QCS_API_VERSION}"))
}

/// Joins an endpoint onto a base URL.
///
/// Endpoints always resolve under the base URL: the versioned API prefix is
/// preserved, and a leading `/` on the endpoint is equivalent to its
/// absence. Absolute `http(s)://` endpoints pass through verbatim.
///
/// # Example
/// ```
/// use qcs_client::api::join_endpoint;
///
/// let url = join_endpoint("http://h/api/v1", "/widgets/");
/// assert_eq!(url, "http://h/api/v1/widgets/");
///
/// let url = join_endpoint("http://h/api/v1/", "widgets/");
/// assert_eq!(url, "http://h/api/v1/widgets/");
/// ```
pub fn join_endpoint(base_url: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
