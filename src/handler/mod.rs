//! Request handler module
//!
//! Responsible for request routing dispatch and the endpoint logic behind
//! each route: log ingestion, log read-back, gateway proxying, and static
//! file serving.

pub mod gateway;
pub mod ingest;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
