//! QCS API client and its response-handling strategies.

pub mod client;
pub mod handlers;
pub mod urls;

pub use client::{Client, ClientBuilder, RequestOptions};
pub use handlers::{ApiResponse, HandlerOutput, ResponseHandler};
pub use urls::{join_endpoint, resolve_base_url};
