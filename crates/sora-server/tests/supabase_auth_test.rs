use axum::http::{header, HeaderMap, HeaderValue};
use httpmock::prelude::*;
use serde_json::json;
use sora_server::services::auth::{AuthError, Authenticator, Session, SupabaseAuthenticator};

fn bearer(token: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {}", token)).unwrap();
    headers.insert(header::AUTHORIZATION, value);
    headers
}

#[tokio::test]
async fn valid_token_yields_user_session() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/v1/user")
                .header("apikey", "anon-key")
                .header("authorization", "Bearer good-token");
            then.status(200).json_body(json!({
                "id": "3f1c0c1e-0000-4000-8000-000000000001",
                "email": "viewer@sora.test",
                "role": "authenticated"
            }));
        })
        .await;

    let auth = SupabaseAuthenticator::new(&server.base_url(), "anon-key", true).unwrap();
    let session = auth.authenticate(&bearer("good-token")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        session,
        Session::User {
            id: "3f1c0c1e-0000-4000-8000-000000000001".into(),
            email: Some("viewer@sora.test".into()),
        }
    );
}

#[tokio::test]
async fn cookie_token_is_sent_to_supabase() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/v1/user")
                .header("authorization", "Bearer cookie-token");
            then.status(200).json_body(json!({ "id": "user-1" }));
        })
        .await;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_static("sb-access-token=cookie-token; i18next=en"),
    );

    let auth = SupabaseAuthenticator::new(&server.base_url(), "anon-key", false).unwrap();
    let session = auth.authenticate(&headers).await.unwrap();

    mock.assert_async().await;
    assert_eq!(session, Session::User { id: "user-1".into(), email: None });
}

#[tokio::test]
async fn rejected_token_is_an_invalid_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/v1/user");
            then.status(401).json_body(json!({ "msg": "invalid JWT" }));
        })
        .await;

    let auth = SupabaseAuthenticator::new(&server.base_url(), "anon-key", false).unwrap();
    let err = auth.authenticate(&bearer("expired")).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidSession));
}

#[tokio::test]
async fn provider_failure_is_reported_separately() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/v1/user");
            then.status(500).body("boom");
        })
        .await;

    let auth = SupabaseAuthenticator::new(&server.base_url(), "anon-key", false).unwrap();
    let err = auth.authenticate(&bearer("token")).await.unwrap_err();
    assert!(matches!(err, AuthError::Provider(_)));
}
