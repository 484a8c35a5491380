//! HTTP protocol layer module
//!
//! Status and CORS response builders plus content-type inference, decoupled
//! from the routing and business logic above it.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_bad_gateway_response,
    build_bad_request_response, build_internal_error_response, build_json_ok_response,
    build_log_dump_response, build_preflight_response, build_sessions_response,
    build_static_file_response,
};
