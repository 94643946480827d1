//! HTTP server layer
//!
//! Axum server with:
//! - CORS open to any origin, plus fixed allow-headers/methods on every response
//! - Request tracing
//! - Graceful shutdown
//! - Uniform JSON success/error envelopes

pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use response::{ApiResult, Envelope};
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
