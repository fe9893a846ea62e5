// 🌐 HTTP API - REST surface over the directory (`server` feature)
//
// Everything is mounted under /v1. Handlers validate their input, build a
// RequestContext from the configured deadline, and call into `Directory`;
// status mapping lives in `error.rs`.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

/// Prefix every route is nested under
pub const API_PREFIX: &str = "/v1";
