//! Request locale detection and translation catalogs.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{header, HeaderMap, Uri};
use axum_extra::extract::CookieJar;
use sora_config::{ConfigError, I18nConfig};
use sora_core::Locale;

/// Query parameter that forces a language.
pub const LOCALE_QUERY_PARAM: &str = "lng";
/// Cookie remembering the visitor's language choice.
pub const LOCALE_COOKIE: &str = "i18next";

/// Resolves the language a request should be served in.
#[async_trait]
pub trait LocaleResolver: Send + Sync {
    async fn resolve(&self, uri: &Uri, headers: &HeaderMap) -> Locale;
}

/// Picks a supported locale from the query string, cookie or `Accept-Language`.
///
/// Order: `?lng=`, `i18next` cookie, `Accept-Language` by descending quality,
/// then the fallback. Only supported locales are ever returned.
pub struct RequestLocaleResolver {
    supported: Vec<Locale>,
    fallback: Locale,
}

impl RequestLocaleResolver {
    pub fn new(supported: Vec<Locale>, fallback: Locale) -> Self {
        Self { supported, fallback }
    }

    pub fn from_config(config: &I18nConfig) -> Result<Self, ConfigError> {
        let supported = config
            .supported
            .iter()
            .map(|tag| {
                Locale::parse(tag).ok_or_else(|| {
                    ConfigError::invalid("SORA_LOCALES", format!("invalid language tag '{}'", tag))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let fallback = Locale::parse(&config.fallback).ok_or_else(|| {
            ConfigError::invalid(
                "SORA_FALLBACK_LOCALE",
                format!("invalid language tag '{}'", config.fallback),
            )
        })?;
        Ok(Self::new(supported, fallback))
    }

    pub fn fallback(&self) -> &Locale {
        &self.fallback
    }

    /// Maps a requested tag onto a supported locale.
    ///
    /// Exact matches win, then a supported tag equal to the requested primary
    /// language (`fr-CA` → `fr`), then any supported tag sharing the primary
    /// language (`pt` → `pt-BR`).
    fn match_supported(&self, requested: &Locale) -> Option<Locale> {
        self.supported
            .iter()
            .find(|s| *s == requested)
            .or_else(|| self.supported.iter().find(|s| s.as_str() == requested.primary()))
            .or_else(|| self.supported.iter().find(|s| s.primary() == requested.primary()))
            .cloned()
    }

    fn from_query(&self, uri: &Uri) -> Option<Locale> {
        let query = uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == LOCALE_QUERY_PARAM)
            .and_then(|(_, v)| Locale::parse(&v))
            .and_then(|l| self.match_supported(&l))
    }

    fn from_cookie(&self, headers: &HeaderMap) -> Option<Locale> {
        CookieJar::from_headers(headers)
            .get(LOCALE_COOKIE)
            .and_then(|c| Locale::parse(c.value()))
            .and_then(|l| self.match_supported(&l))
    }

    fn from_accept_language(&self, headers: &HeaderMap) -> Option<Locale> {
        let value = headers.get(header::ACCEPT_LANGUAGE)?.to_str().ok()?;
        parse_accept_language(value)
            .iter()
            .find_map(|l| self.match_supported(l))
    }
}

#[async_trait]
impl LocaleResolver for RequestLocaleResolver {
    async fn resolve(&self, uri: &Uri, headers: &HeaderMap) -> Locale {
        self.from_query(uri)
            .or_else(|| self.from_cookie(headers))
            .or_else(|| self.from_accept_language(headers))
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Parses an `Accept-Language` value into tags ordered by quality.
///
/// Wildcards, malformed tags and `q=0` entries are dropped; ties keep header
/// order.
pub fn parse_accept_language(value: &str) -> Vec<Locale> {
    let mut weighted: Vec<(f32, Locale)> = value
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag == "*" {
                return None;
            }
            let quality = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            if quality <= 0.0 {
                return None;
            }
            Locale::parse(tag).map(|l| (quality, l))
        })
        .collect();

    weighted.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    weighted.into_iter().map(|(_, l)| l).collect()
}

// ============================================================================
// Translations
// ============================================================================

const EMBEDDED_CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("fr", include_str!("../../locales/fr.json")),
    ("ja", include_str!("../../locales/ja.json")),
    ("vi", include_str!("../../locales/vi.json")),
];

/// Flat key → string catalogs per locale.
pub struct Translations {
    catalogs: HashMap<String, HashMap<String, String>>,
    fallback: Locale,
}

impl Translations {
    /// Loads the catalogs compiled into the binary.
    pub fn embedded(fallback: Locale) -> Result<Self, serde_json::Error> {
        let mut catalogs = HashMap::new();
        for (tag, json) in EMBEDDED_CATALOGS {
            catalogs.insert(tag.to_string(), serde_json::from_str(json)?);
        }
        Ok(Self { catalogs, fallback })
    }

    /// Looks up `key` for `locale`, then its primary language, then the
    /// fallback locale; returns the key itself when nothing matches.
    pub fn t(&self, locale: &Locale, key: &str) -> String {
        [locale.as_str(), locale.primary(), self.fallback.as_str()]
            .iter()
            .find_map(|tag| self.catalogs.get(*tag).and_then(|c| c.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
