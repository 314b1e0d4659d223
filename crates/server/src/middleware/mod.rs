//! HTTP middleware stack for the user registry.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (installed in `main`)
//! 2. `TraceLayer` (request span with method, URI, request ID, status, latency)
//! 3. Request ID (add unique ID to each request)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
