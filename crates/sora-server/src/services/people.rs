//! Loader for the popular people listing.

use axum::http::{HeaderMap, Uri};
use sora_core::{ListCategory, Locale, PageNumber, PeopleList};
use tracing::debug;

use crate::error::AppError;
use crate::services::auth::Session;
use crate::ServerState;

/// Everything the listing page needs to render.
#[derive(Debug, Clone)]
pub struct LoaderData {
    pub people: PeopleList,
    pub locale: Locale,
    pub session: Session,
}

/// Query parameter selecting the listing page.
pub const PAGE_QUERY_PARAM: &str = "page";

/// First raw `page` value in the query string; later repeats are ignored.
pub fn page_param(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == PAGE_QUERY_PARAM)
        .map(|(_, v)| v.into_owned())
}

/// Authenticates the request and fetches one page of popular people.
///
/// Authentication and locale resolution run concurrently; an authentication
/// error aborts before anything is fetched. Malformed page values are
/// normalized, never rejected.
pub async fn load(
    state: &ServerState,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<LoaderData, AppError> {
    let (session, locale) = tokio::join!(
        state.auth.authenticate(headers),
        state.locales.resolve(uri, headers)
    );
    let session = session?;

    let page = PageNumber::from_query(page_param(uri).as_deref());
    debug!(
        "Loading popular people (locale: {}, page: {:?})",
        locale,
        page.map(|p| p.get())
    );

    let people = state
        .people
        .get_list_people(ListCategory::Popular, &locale, page)
        .await?;

    Ok(LoaderData { people, locale, session })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(uri: &str) -> Option<String> {
        page_param(&uri.parse().unwrap())
    }

    #[test]
    fn first_page_value_wins() {
        assert_eq!(page("/people?page=2&page=3").as_deref(), Some("2"));
        assert_eq!(page("/people?lng=fr&page=7").as_deref(), Some("7"));
    }

    #[test]
    fn page_value_is_percent_decoded() {
        assert_eq!(page("/people?page=%2012%20").as_deref(), Some(" 12 "));
        assert_eq!(page("/people?page=").as_deref(), Some(""));
    }

    #[test]
    fn missing_page_is_none() {
        assert_eq!(page("/people"), None);
        assert_eq!(page("/people?lng=ja"), None);
    }
}
