//! HTTP middleware: session layer and authentication extractors.

pub mod auth;
pub mod session;

pub use auth::{GateSnapshot, RequireAdmin, RequireUser};
pub use session::create_session_layer;
