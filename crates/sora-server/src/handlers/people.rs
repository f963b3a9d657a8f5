//! Popular people listing: HTML page, JSON loader data and route metadata.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Html,
    Json,
};

use crate::dto::{MetaResponse, PeopleResponse};
use crate::error::AppError;
use crate::render::render_document;
use crate::services::people::load;
use crate::view::{Breadcrumb, MediaListProps, PageMeta, PeopleView, Transition};
use crate::ServerState;

/// Renders the listing page.
pub async fn page(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let data = load(&state, &uri, &headers).await?;

    let list_name = state.translations.t(&data.locale, "popularPeople");
    let location = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let view = PeopleView {
        transition: Transition::for_location(location),
        media_list: MediaListProps::from_people(&data.people, list_name),
    };

    Ok(Html(render_document(
        &PageMeta::popular_people(&state.config.public_url),
        &Breadcrumb::popular_people(),
        &view,
        &data.locale,
        &state.translations,
    )))
}

/// Returns the loader payload as JSON.
pub async fn data(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<PeopleResponse>, AppError> {
    let data = load(&state, &uri, &headers).await?;
    Ok(Json(PeopleResponse { people: data.people }))
}

/// Returns the document metadata and breadcrumb for the listing route.
pub async fn meta(State(state): State<Arc<ServerState>>) -> Json<MetaResponse> {
    Json(MetaResponse {
        meta: PageMeta::popular_people(&state.config.public_url),
        breadcrumb: Breadcrumb::popular_people(),
    })
}
