//! Core domain types and ports for sora.
//!
//! This crate provides the types shared across the sora workspace:
//!
//! - [`MediaError`] — Error type for media data lookups
//! - [`Person`] and [`KnownFor`] — Celebrity records as returned by TMDB
//! - [`PagedResult`] and [`PeopleList`] — One page of a remote listing
//! - [`ListCategory`], [`PageNumber`], [`Locale`] — Listing request parameters
//! - [`PeopleSource`] — Port implemented by media data clients
//!
//! # Example
//!
//! ```rust
//! use sora_core::{Locale, PageNumber};
//!
//! let locale = Locale::parse("pt_br").unwrap();
//! assert_eq!(locale.as_str(), "pt-BR");
//!
//! assert_eq!(PageNumber::from_query(Some("7")).map(|p| p.get()), Some(7));
//! assert_eq!(PageNumber::from_query(Some("1001")).map(|p| p.get()), Some(1));
//! assert_eq!(PageNumber::from_query(None), None);
//! ```

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while fetching media data from a remote API.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The request could not be sent or the connection failed.
    #[error("Media request failed: {0}")]
    Request(String),

    /// The remote API answered with a non-success status.
    #[error("Media API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Failed to parse media response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for MediaError {
    fn from(err: serde_json::Error) -> Self {
        MediaError::Parse(err.to_string())
    }
}

// ============================================================================
// Request parameters
// ============================================================================

/// People listings exposed by the media API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListCategory {
    /// Most popular people right now.
    Popular,
}

impl ListCategory {
    /// Path segment used by the remote API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListCategory::Popular => "popular",
        }
    }
}

impl FromStr for ListCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ListCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing page number, always within `[PageNumber::MIN, PageNumber::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const MIN: u32 = 1;
    /// TMDB refuses listing pages above this.
    pub const MAX: u32 = 1000;

    /// Keeps in-range values and maps everything else to the first page.
    pub fn clamped(raw: i64) -> Self {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&raw) {
            Self(raw as u32)
        } else {
            Self(Self::MIN)
        }
    }

    /// Interprets a raw `page` query value.
    ///
    /// Absent, blank or non-numeric values yield `None` so the data client
    /// applies its own default. Numeric values are truncated to an integer and
    /// clamped with [`PageNumber::clamped`].
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }

        let value: f64 = raw.parse().ok()?;
        if value.is_nan() {
            return None;
        }

        let truncated = value.trunc();
        if truncated < Self::MIN as f64 || truncated > Self::MAX as f64 {
            return Some(Self(Self::MIN));
        }
        Some(Self::clamped(truncated as i64))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized language tag such as `en`, `fr` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parses and normalizes a language tag.
    ///
    /// Accepts `-` or `_` as separator. The primary subtag is lowercased and a
    /// two-letter region is uppercased. Returns `None` for malformed tags.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }

        let mut parts = Vec::new();
        for (i, subtag) in tag.split(['-', '_']).enumerate() {
            let alphanumeric = subtag.chars().all(|c| c.is_ascii_alphanumeric());
            if subtag.is_empty() || subtag.len() > 8 || !alphanumeric {
                return None;
            }
            let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let normalized = match i {
                0 if (2..=3).contains(&subtag.len()) && alphabetic => subtag.to_ascii_lowercase(),
                0 => return None,
                _ if subtag.len() == 2 && alphabetic => subtag.to_ascii_uppercase(),
                _ => subtag.to_string(),
            };
            parts.push(normalized);
        }

        Some(Self(parts.join("-")))
    }

    /// The primary language subtag (`pt` for `pt-BR`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Locale::parse(&value).ok_or_else(|| format!("invalid language tag: {}", value))
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

// ============================================================================
// Listing data
// ============================================================================

/// A movie or TV show a person is known for.
///
/// Only `id` is typed; every other field is kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownFor {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl KnownFor {
    /// `movie` or `tv`.
    pub fn media_type(&self) -> Option<&str> {
        str_field(&self.fields, "media_type")
    }

    /// Display title regardless of media type (`title` for movies, `name` for TV).
    pub fn display_title(&self) -> Option<&str> {
        str_field(&self.fields, "title").or_else(|| str_field(&self.fields, "name"))
    }
}

/// A celebrity record, in the remote API's field naming.
///
/// `id` and `name` are typed; the rest is kept as received so the record
/// serializes back unchanged, unknown fields and explicit nulls included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Person {
    pub fn profile_path(&self) -> Option<&str> {
        str_field(&self.fields, "profile_path")
    }

    pub fn known_for_department(&self) -> Option<&str> {
        str_field(&self.fields, "known_for_department")
    }

    /// Titles the person is known for; malformed entries are skipped.
    pub fn known_for(&self) -> Vec<KnownFor> {
        self.fields
            .get("known_for")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| KnownFor::deserialize(item).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// One page of a remote listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> PagedResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A page of people.
pub type PeopleList = PagedResult<Person>;

/// Source of people listings (implemented by the TMDB client).
#[async_trait]
pub trait PeopleSource: Send + Sync {
    /// Fetches one page of the given listing.
    ///
    /// `page` is `None` when the caller has no explicit page; the source then
    /// applies its own default.
    async fn get_list_people(
        &self,
        category: ListCategory,
        locale: &Locale,
        page: Option<PageNumber>,
    ) -> Result<PeopleList, MediaError>;
}
