//! Data transfer objects for HTTP message serialization.

use serde::Serialize;
use sora_core::PeopleList;

use crate::view::{Breadcrumb, PageMeta};

/// Loader payload for the people listing.
#[derive(Debug, Serialize)]
pub struct PeopleResponse {
    pub people: PeopleList,
}

/// Route metadata and navigation handle.
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub meta: PageMeta,
    pub breadcrumb: Breadcrumb,
}
