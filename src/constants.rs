//! Application-wide constants shared by the client and the CLI.

/// Versioned API path prefix appended to every resolved base URL
pub const QCS_API_VERSION: &str = "api/v1/";

/// Token-issuing path, relative to the base URL
pub const QCS_TOKEN_PATH: &str = "token/";

/// Name of the configuration section holding server connection settings
pub const QCS_CONFIG_SECTION: &str = "qcs";

/// Username used when the configuration provides none.
/// This is the server's default administrative account, not a security boundary.
pub const DEFAULT_USERNAME: &str = "admin";

/// Password used when the configuration provides none
pub const DEFAULT_PASSWORD: &str = "pass";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;
