//! Client library for the QCS API.
//!
//! Resolves the target server from layered configuration, authenticates
//! against the token endpoint, and pipes every response through a
//! configurable handling strategy.
//!
//! # Examples
//!
//! ```rust,no_run
//! use qcs_client::api::{Client, RequestOptions, ResponseHandler};
//! use qcs_client::config::Config;
//! use qcs_client::error::ApiError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ApiError> {
//!     let config = Config::load().await?;
//!
//!     // Authenticated client with the default status-validating handler
//!     let client = Client::authenticated(&config).await?;
//!     let scans = client.get("scans/", RequestOptions::default()).await?;
//!
//!     // A second client with the Echo handler for inspecting error
//!     // responses programmatically
//!     let raw = Client::builder()
//!         .response_handler(ResponseHandler::Echo)
//!         .build(&config)?;
//!     let response = raw.get("scans/9999/", RequestOptions::default()).await?;
//!     assert_eq!(response.into_raw().unwrap().status().as_u16(), 404);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used types for convenience
pub use api::{ApiResponse, Client, ClientBuilder, HandlerOutput, RequestOptions, ResponseHandler};
pub use config::{Config, QcsConfig};
pub use error::ApiError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
