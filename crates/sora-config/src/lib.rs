//! Server configuration for sora.
//!
//! Everything is read from environment variables (a `.env` file is loaded by
//! the server binary before this runs):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SORA_BIND_ADDR` | `0.0.0.0:3000` |
//! | `SORA_PUBLIC_URL` | `https://sora-anime.vercel.app` |
//! | `SORA_REQUIRE_AUTH` | `false` |
//! | `SORA_LOCALES` | `en,fr,ja,vi` |
//! | `SORA_FALLBACK_LOCALE` | `en` |
//! | `TMDB_API_BASE` | `https://api.themoviedb.org/3` |
//! | `TMDB_API_KEY` | required |
//! | `TMDB_TIMEOUT_SECS` | `10` |
//! | `SUPABASE_URL` | required |
//! | `SUPABASE_ANON_KEY` | required |
//!
//! ```rust
//! use std::collections::HashMap;
//! use sora_config::ServerConfig;
//!
//! let env = HashMap::from([
//!     ("TMDB_API_KEY", "key"),
//!     ("SUPABASE_URL", "https://project.supabase.co"),
//!     ("SUPABASE_ANON_KEY", "anon"),
//! ]);
//! let config = ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
//! assert_eq!(config.bind_addr, "0.0.0.0:3000");
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

/// Errors raised while reading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required config '{0}'")]
    Missing(String),

    /// A variable is set but unusable.
    #[error("Invalid config '{key}': {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    /// Creates an invalid-value error.
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// TMDB API access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_base: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub timeout_secs: u64,
}

/// Supabase project used to validate sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    #[serde(skip_serializing)]
    pub anon_key: String,
}

/// Languages the site is translated into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    pub supported: Vec<String>,
    pub fallback: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            supported: ["en", "fr", "ja", "vi"].iter().map(|s| s.to_string()).collect(),
            fallback: "en".into(),
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Public origin used for social preview links.
    pub public_url: String,
    /// Reject requests without a valid session.
    pub require_auth: bool,
    pub tmdb: TmdbConfig,
    pub supabase: SupabaseConfig,
    pub i18n: I18nConfig,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PUBLIC_URL: &str = "https://sora-anime.vercel.app";
const DEFAULT_TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_TMDB_TIMEOUT_SECS: u64 = 10;

impl ServerConfig {
    /// Reads and validates configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads and validates configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| get(key).ok_or_else(|| ConfigError::Missing(key.to_string()));

        let require_auth = match get("SORA_REQUIRE_AUTH") {
            Some(v) => parse_bool("SORA_REQUIRE_AUTH", &v)?,
            None => false,
        };

        let timeout_secs = match get("TMDB_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| {
                ConfigError::invalid("TMDB_TIMEOUT_SECS", format!("not a number: {}", v))
            })?,
            None => DEFAULT_TMDB_TIMEOUT_SECS,
        };

        let defaults = I18nConfig::default();
        let i18n = I18nConfig {
            supported: get("SORA_LOCALES")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.supported),
            fallback: get("SORA_FALLBACK_LOCALE").unwrap_or(defaults.fallback),
        };

        let config = Self {
            bind_addr: get("SORA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            public_url: get("SORA_PUBLIC_URL")
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.into())
                .trim_end_matches('/')
                .to_string(),
            require_auth,
            tmdb: TmdbConfig {
                api_base: get("TMDB_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TMDB_API_BASE.into())
                    .trim_end_matches('/')
                    .to_string(),
                api_key: required("TMDB_API_KEY")?,
                timeout_secs,
            },
            supabase: SupabaseConfig {
                url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
                anon_key: required("SUPABASE_ANON_KEY")?,
            },
            i18n,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("SORA_PUBLIC_URL", &self.public_url)?;
        validate_http_url("TMDB_API_BASE", &self.tmdb.api_base)?;
        validate_http_url("SUPABASE_URL", &self.supabase.url)?;

        if self.tmdb.timeout_secs == 0 {
            return Err(ConfigError::invalid("TMDB_TIMEOUT_SECS", "must be at least 1"));
        }
        if self.i18n.supported.is_empty() {
            return Err(ConfigError::invalid("SORA_LOCALES", "at least one locale is required"));
        }
        if !self.i18n.supported.contains(&self.i18n.fallback) {
            return Err(ConfigError::invalid(
                "SORA_FALLBACK_LOCALE",
                format!("'{}' is not one of {:?}", self.i18n.fallback, self.i18n.supported),
            ));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(key, format!("expected a boolean, got '{}'", other))),
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::invalid(key, format!("invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::invalid(key, format!("unsupported URL scheme: {}", scheme))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("TMDB_API_KEY", "tmdb-key"),
            ("SUPABASE_URL", "https://project.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<ServerConfig, ConfigError> {
        ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.public_url, DEFAULT_PUBLIC_URL);
        assert_eq!(config.tmdb.api_base, DEFAULT_TMDB_API_BASE);
        assert_eq!(config.tmdb.timeout_secs, 10);
        assert_eq!(config.supabase.url, "https://project.supabase.co");
        assert_eq!(config.i18n.supported, vec!["en", "fr", "ja", "vi"]);
        assert_eq!(config.i18n.fallback, "en");
        assert!(!config.require_auth);
    }

    #[test]
    fn missing_required_key_is_reported() {
        let mut env = base_env();
        env.remove("TMDB_API_KEY");
        match load(&env) {
            Err(ConfigError::Missing(key)) => assert_eq!(key, "TMDB_API_KEY"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn locales_and_flags_are_parsed() {
        let mut env = base_env();
        env.insert("SORA_LOCALES", " en , de ,, ");
        env.insert("SORA_FALLBACK_LOCALE", "de");
        env.insert("SORA_REQUIRE_AUTH", "Yes");
        let config = load(&env).unwrap();
        assert_eq!(config.i18n.supported, vec!["en", "de"]);
        assert_eq!(config.i18n.fallback, "de");
        assert!(config.require_auth);
    }

    #[test]
    fn fallback_must_be_supported() {
        let mut env = base_env();
        env.insert("SORA_FALLBACK_LOCALE", "de");
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { key, .. }) if key == "SORA_FALLBACK_LOCALE"
        ));
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut env = base_env();
        env.insert("TMDB_API_BASE", "ftp://tmdb.example");
        assert!(load(&env).is_err());

        let mut env = base_env();
        env.insert("TMDB_TIMEOUT_SECS", "0");
        assert!(load(&env).is_err());

        let mut env = base_env();
        env.insert("SORA_REQUIRE_AUTH", "maybe");
        assert!(load(&env).is_err());
    }
}
