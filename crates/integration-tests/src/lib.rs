//! Integration tests for the employee portal.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations against a local database
//! cargo run -p portal-cli -- migrate
//!
//! # Start the server
//! cargo run -p portal-server
//!
//! # Run the ignored integration tests
//! cargo test -p portal-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth` - Registration, login, logout and the admission gate
//! - `solicitacoes` - Request submission and triage
//! - `admin` - Administrator record management and reports

use reqwest::Client;

/// Base URL for the portal (configurable via environment).
#[must_use]
pub fn portal_base_url() -> String {
    std::env::var("PORTAL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store for session handling.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique throwaway email for one test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4())
}
