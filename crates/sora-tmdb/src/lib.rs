//! TMDB v3 API client for sora.
//!
//! - [`TmdbClient`] — reqwest-based client implementing [`PeopleSource`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sora_core::{ListCategory, Locale, PageNumber, PeopleSource};
//! use sora_tmdb::TmdbClient;
//!
//! let client = TmdbClient::new("https://api.themoviedb.org/3", api_key, Duration::from_secs(10))?;
//! let locale = Locale::parse("en").unwrap();
//! let people = client
//!     .get_list_people(ListCategory::Popular, &locale, Some(PageNumber::clamped(2)))
//!     .await?;
//! println!("page {} of {}", people.page, people.total_pages);
//! ```

mod client;

pub use client::TmdbClient;
pub use sora_core::{MediaError, PeopleList, PeopleSource};
