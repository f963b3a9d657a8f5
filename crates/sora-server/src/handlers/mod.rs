//! HTTP route handlers.

pub mod people;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
