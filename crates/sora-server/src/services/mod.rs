//! Request-scoped services used by the HTTP handlers.

pub mod auth;
pub mod i18n;
pub mod people;
