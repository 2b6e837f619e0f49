//! Application constants and configuration values.
//!
//! This module centralizes hardcoded values so routes and resource URL
//! building agree with each other.

/// API Version constants
pub mod api {
    /// Base path of the customer resource, trailing slash included.
    /// Resource URLs are built as `API_URL_V1 + id`.
    pub const API_URL_V1: &str = "/api/v1/customers/";

    /// Customer collection path without the trailing slash
    pub const CUSTOMERS_ROOT: &str = "/api/v1/customers";

    /// Single customer route template
    pub const CUSTOMER_BY_ID: &str = "/api/v1/customers/{id}";

    /// Request ID response header
    pub const REQUEST_ID_HEADER: &str = "X-Request-ID";
}

/// Server defaults
pub mod server {
    /// Default listen port
    pub const DEFAULT_PORT: u16 = 8080;

    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Default database pool size
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
}

pub use api::API_URL_V1;
