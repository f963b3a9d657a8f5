//! Request authentication against Supabase sessions.
//!
//! The access token is read from `Authorization: Bearer <token>` or, for
//! browser requests, from the `sb-access-token` cookie. Requests without a
//! token are anonymous unless the server requires authentication.

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Cookie holding the Supabase access token.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Errors that reject a request.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No credentials were sent but the server requires them.
    #[error("Authentication required")]
    Unauthenticated,

    /// The token was refused by the identity provider.
    #[error("Session is invalid or expired")]
    InvalidSession,

    /// The identity provider could not be reached or misbehaved.
    #[error("Auth provider error: {0}")]
    Provider(String),
}

#[derive(Serialize)]
struct AuthErrorResponse {
    error: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Unauthenticated | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::Provider(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(AuthErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Outcome of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
    Anonymous,
    User { id: String, email: Option<String> },
}

/// Validates incoming requests.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the caller's session or an error that aborts the request.
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Session, AuthError>;
}

/// Extracts the access token from the request, header first.
///
/// The `Bearer` scheme name is matched case-insensitively.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Subset of the Supabase `/auth/v1/user` response.
#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Authenticator backed by the Supabase auth API.
pub struct SupabaseAuthenticator {
    client: reqwest::Client,
    url: String,
    anon_key: String,
    require_auth: bool,
}

impl SupabaseAuthenticator {
    /// Creates an authenticator for the given Supabase project URL.
    pub fn new(url: &str, anon_key: &str, require_auth: bool) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            require_auth,
        })
    }

    async fn fetch_user(&self, token: &str) -> Result<Session, AuthError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        match response.status() {
            s if s.is_success() => {
                let user: SupabaseUser = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Provider(e.to_string()))?;
                debug!("Authenticated user {}", user.id);
                Ok(Session::User { id: user.id, email: user.email })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidSession),
            s => {
                warn!("Supabase auth returned {}", s);
                Err(AuthError::Provider(format!("unexpected status {}", s.as_u16())))
            }
        }
    }
}

#[async_trait]
impl Authenticator for SupabaseAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Session, AuthError> {
        match access_token(headers) {
            Some(token) => self.fetch_user(&token).await,
            None if self.require_auth => Err(AuthError::Unauthenticated),
            None => Ok(Session::Anonymous),
        }
    }
}
