//! HTTP server for the sora popular people listing.
//!
//! Exposes [`build_app`] so the router can be served by the binary or driven
//! directly in tests, and [`init_server_state`] to wire the default
//! collaborators (Supabase sessions, request locale, TMDB) from configuration.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod render;
pub mod services;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::get;
use axum::Router;
use sora_config::ServerConfig;
use sora_core::PeopleSource;
use sora_tmdb::TmdbClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::auth::{Authenticator, SupabaseAuthenticator};
use crate::services::i18n::{LocaleResolver, RequestLocaleResolver, Translations};

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub config: ServerConfig,
    pub auth: Arc<dyn Authenticator>,
    pub locales: Arc<dyn LocaleResolver>,
    pub people: Arc<dyn PeopleSource>,
    pub translations: Translations,
}

/// Builds the default collaborators from configuration.
pub fn init_server_state(config: ServerConfig) -> anyhow::Result<ServerState> {
    let auth = SupabaseAuthenticator::new(
        &config.supabase.url,
        &config.supabase.anon_key,
        config.require_auth,
    )?;
    let locales = RequestLocaleResolver::from_config(&config.i18n)?;
    let people = TmdbClient::from_config(&config.tmdb)?;
    let translations = Translations::embedded(locales.fallback().clone())?;

    info!(
        "Locales: {} (fallback {}), auth required: {}",
        config.i18n.supported.join(", "),
        config.i18n.fallback,
        config.require_auth
    );

    Ok(ServerState {
        config,
        auth: Arc::new(auth),
        locales: Arc::new(locales),
        people: Arc::new(people),
        translations,
    })
}

/// Builds the router with tracing and CORS layers.
pub fn build_app(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/people", get(handlers::people::page))
        .route("/api/people", get(handlers::people::data))
        .route("/api/people/meta", get(handlers::people::meta))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
