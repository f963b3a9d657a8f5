//! HTTP client for TMDB people listings.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use sora_config::TmdbConfig;
use sora_core::{
    ListCategory, Locale, MediaError, PageNumber, PagedResult, PeopleList, PeopleSource, Person,
};
use tracing::{debug, info};

/// Raw TMDB paged response.
#[derive(Debug, Deserialize)]
struct TmdbPage<T> {
    page: u32,
    results: Vec<T>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

/// TMDB error body (`{"status_code": 7, "status_message": "..."}`).
#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

fn request_err(e: impl ToString) -> MediaError {
    MediaError::Request(e.to_string())
}

/// Client for the TMDB v3 REST API.
pub struct TmdbClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl TmdbClient {
    /// Creates a client for the given API base (e.g. `https://api.themoviedb.org/3`).
    pub fn new(
        api_base: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(request_err)?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Creates a client from server configuration.
    pub fn from_config(config: &TmdbConfig) -> Result<Self, MediaError> {
        Self::new(
            &config.api_base,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn list_people_url(&self, category: ListCategory) -> String {
        format!("{}/person/{}", self.api_base, category)
    }

    /// Fetches one page of a people listing.
    pub async fn list_people(
        &self,
        category: ListCategory,
        locale: &Locale,
        page: Option<PageNumber>,
    ) -> Result<PeopleList, MediaError> {
        let start = Instant::now();
        let url = self.list_people_url(category);
        let query = list_people_query(&self.api_key, locale, page);

        debug!(
            "TMDB request: GET {} (language={}, page={:?})",
            url,
            locale,
            page.map(|p| p.get())
        );

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(request_err)?;

        let status = response.status();
        let body = response.text().await.map_err(request_err)?;

        if !status.is_success() {
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                });
            return Err(MediaError::Status { status: status.as_u16(), message });
        }

        let raw: TmdbPage<Person> = serde_json::from_str(&body)?;
        let people = PagedResult {
            items: raw.results,
            page: raw.page,
            total_pages: raw.total_pages,
            total_results: raw.total_results,
        };

        info!(
            "TMDB person/{}: {} items, page {}/{}, {}ms",
            category,
            people.items.len(),
            people.page,
            people.total_pages,
            start.elapsed().as_millis()
        );

        Ok(people)
    }
}

/// Query pairs for a people listing; `page` is left out when not given.
fn list_people_query(
    api_key: &str,
    locale: &Locale,
    page: Option<PageNumber>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("api_key", api_key.to_string()),
        ("language", locale.to_string()),
    ];
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    query
}

#[async_trait]
impl PeopleSource for TmdbClient {
    async fn get_list_people(
        &self,
        category: ListCategory,
        locale: &Locale,
        page: Option<PageNumber>,
    ) -> Result<PeopleList, MediaError> {
        self.list_people(category, locale, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_omits_page_without_override() {
        let locale = Locale::parse("ja").unwrap();
        let query = list_people_query("k", &locale, None);
        assert_eq!(query, vec![("api_key", "k".to_string()), ("language", "ja".to_string())]);
    }

    #[test]
    fn query_includes_explicit_page() {
        let locale = Locale::parse("en").unwrap();
        let query = list_people_query("k", &locale, Some(PageNumber::clamped(12)));
        assert!(query.contains(&("page", "12".to_string())));
    }

    #[test]
    fn url_joins_base_and_category() {
        let client = TmdbClient::new("http://tmdb.test/3/", "k", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.list_people_url(ListCategory::Popular),
            "http://tmdb.test/3/person/popular"
        );
    }
}
