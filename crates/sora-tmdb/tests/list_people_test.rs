use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use sora_core::{ListCategory, Locale, MediaError, PageNumber, PeopleSource};
use sora_tmdb::TmdbClient;

fn client(server: &MockServer) -> TmdbClient {
    TmdbClient::new(&server.base_url(), "test-key", Duration::from_secs(5)).unwrap()
}

fn popular_body() -> serde_json::Value {
    json!({
        "page": 3,
        "total_pages": 500,
        "total_results": 10000,
        "results": [
            {
                "id": 500,
                "name": "Tom Cruise",
                "original_name": "Tom Cruise",
                "profile_path": "/tom.jpg",
                "known_for_department": "Acting",
                "popularity": 88.5,
                "gender": 2,
                "adult": false,
                "known_for": [
                    {
                        "id": 954,
                        "media_type": "movie",
                        "title": "Mission: Impossible",
                        "poster_path": "/mi.jpg",
                        "vote_average": 7.2,
                        "release_date": "1996-05-22"
                    }
                ]
            },
            {
                "id": 1245,
                "name": "Scarlett Johansson",
                "profile_path": null,
                "known_for_department": "Acting",
                "popularity": 70.1,
                "known_for": []
            }
        ]
    })
}

#[tokio::test]
async fn fetches_requested_page_in_locale() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/person/popular")
                .query_param("api_key", "test-key")
                .query_param("language", "fr")
                .query_param("page", "3");
            then.status(200).json_body(popular_body());
        })
        .await;

    let locale = Locale::parse("fr").unwrap();
    let people = client(&server)
        .get_list_people(ListCategory::Popular, &locale, Some(PageNumber::clamped(3)))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(people.page, 3);
    assert_eq!(people.total_pages, 500);
    assert_eq!(people.total_results, 10000);
    assert_eq!(people.items.len(), 2);
    assert_eq!(people.items[0].name, "Tom Cruise");
    assert_eq!(people.items[0].known_for()[0].display_title(), Some("Mission: Impossible"));
    assert_eq!(people.items[1].profile_path(), None);
}

#[tokio::test]
async fn items_keep_every_remote_field() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/person/popular");
            then.status(200).json_body(popular_body());
        })
        .await;

    let locale = Locale::parse("en").unwrap();
    let people = client(&server)
        .get_list_people(ListCategory::Popular, &locale, None)
        .await
        .unwrap();

    let items = serde_json::to_value(&people.items).unwrap();
    assert_eq!(items, popular_body()["results"]);
}

#[tokio::test]
async fn items_keep_remote_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/person/popular");
            then.status(200).json_body(popular_body());
        })
        .await;

    let locale = Locale::parse("en").unwrap();
    let people = client(&server)
        .get_list_people(ListCategory::Popular, &locale, None)
        .await
        .unwrap();

    let ids: Vec<u64> = people.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![500, 1245]);
}

#[tokio::test]
async fn error_status_carries_tmdb_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/person/popular");
            then.status(401).json_body(json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key.",
                "success": false
            }));
        })
        .await;

    let locale = Locale::parse("en").unwrap();
    let err = client(&server)
        .get_list_people(ListCategory::Popular, &locale, None)
        .await
        .unwrap_err();

    match err {
        MediaError::Status { status, message } => {
            assert_eq!(status, 401);
            assert!(message.starts_with("Invalid API key"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/person/popular");
            then.status(200).body("{\"page\": \"one\"}");
        })
        .await;

    let locale = Locale::parse("en").unwrap();
    let err = client(&server)
        .get_list_people(ListCategory::Popular, &locale, None)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::Parse(_)));
}
