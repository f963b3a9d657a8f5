//! View models for the popular people page: document metadata, breadcrumb,
//! page transition and the props handed to the media list grid.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use sora_core::{PageNumber, PeopleList, Person};

const TITLE: &str = "Discover most popular celebs on Sora";
const DESCRIPTION: &str = "Discover the most popular celebrities right now on Sora.";
const KEYWORDS: &str = concat!(
    "popular celebrities, popular celebrity, top celebrities, top celebrity, ",
    "people celebrity, celebrity people, best celebrity, best celebrities, ",
    "famous celebrity, famous people, celebrity movies, movies by celebrity, ",
    "celebrity tv shows, tv show celebrities, celebrity television shows, ",
    "celebrity tv series",
);
const OG_IMAGE: &str = "https://static.alphacoders.com/thumbs_categories/20.jpg";

/// Route of the listing page.
pub const PEOPLE_PATH: &str = "/people";

/// Static document metadata for SEO and social previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_url: String,
    pub og_title: String,
    pub og_image: String,
    pub og_description: String,
}

impl PageMeta {
    pub fn popular_people(public_url: &str) -> Self {
        Self {
            title: TITLE.into(),
            description: DESCRIPTION.into(),
            keywords: KEYWORDS.into(),
            og_url: format!("{}{}", public_url.trim_end_matches('/'), PEOPLE_PATH),
            og_title: TITLE.into(),
            og_image: OG_IMAGE.into(),
            og_description: DESCRIPTION.into(),
        }
    }

    /// Key/value pairs in document order.
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("keywords", self.keywords.as_str()),
            ("og:url", self.og_url.as_str()),
            ("og:title", self.og_title.as_str()),
            ("og:image", self.og_image.as_str()),
            ("og:description", self.og_description.as_str()),
        ]
    }
}

impl Serialize for PageMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Navigation breadcrumb for this route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub label: &'static str,
    pub href: &'static str,
    pub aria_label: &'static str,
}

impl Breadcrumb {
    pub const fn popular_people() -> Self {
        Self {
            label: "Popular People",
            href: "/people?index",
            aria_label: "Popular People",
        }
    }
}

/// One keyframe of the page transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<&'static str>,
    pub opacity: f64,
}

/// Slide-in / fade-out transition keyed by the current location, so every
/// page change replays it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub key: String,
    pub initial: MotionState,
    pub animate: MotionState,
    pub exit: MotionState,
    /// Seconds.
    pub duration: f64,
}

impl Transition {
    pub fn for_location(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            initial: MotionState { x: Some("-10%"), y: None, opacity: 0.0 },
            animate: MotionState { x: Some("0"), y: None, opacity: 1.0 },
            exit: MotionState { x: None, y: Some("-10%"), opacity: 0.0 },
            duration: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemsType {
    People,
}

/// Props for the shared media list component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListProps<'a> {
    pub current_page: u32,
    pub items: &'a [Person],
    pub list_name: String,
    pub list_type: ListType,
    pub show_pagination: bool,
    pub total_pages: u32,
    pub items_type: ItemsType,
}

impl<'a> MediaListProps<'a> {
    /// Wires a fetched page into grid props; `None` when there is nothing to show.
    pub fn from_people(people: &'a PeopleList, list_name: impl Into<String>) -> Option<Self> {
        if people.is_empty() {
            return None;
        }
        Some(Self {
            current_page: people.page,
            items: &people.items,
            list_name: list_name.into(),
            list_type: ListType::Grid,
            show_pagination: true,
            total_pages: people.total_pages,
            items_type: ItemsType::People,
        })
    }

    /// Link the pagination control navigates to.
    pub fn page_href(page: u32) -> String {
        format!("{}?page={}", PEOPLE_PATH, page)
    }

    /// Last page reachable through pagination.
    pub fn last_page(&self) -> u32 {
        self.total_pages.min(PageNumber::MAX).max(self.current_page).max(1)
    }

    /// Page numbers shown around the current one.
    pub fn page_window(&self, radius: u32) -> std::ops::RangeInclusive<u32> {
        let last = self.last_page();
        let start = self.current_page.saturating_sub(radius).max(1);
        let end = self.current_page.saturating_add(radius).min(last);
        start..=end
    }
}

/// Everything rendered inside the page container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleView<'a> {
    pub transition: Transition,
    pub media_list: Option<MediaListProps<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sora_core::PagedResult;

    fn person(id: u64, name: &str) -> Person {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "known_for_department": "Acting"
        }))
        .unwrap()
    }

    fn people(items: Vec<Person>, page: u32, total_pages: u32) -> PeopleList {
        PagedResult { items, page, total_pages, total_results: 0 }
    }

    #[test]
    fn empty_page_renders_no_list() {
        let list = people(vec![], 1, 0);
        assert!(MediaListProps::from_people(&list, "Popular People").is_none());
    }

    #[test]
    fn props_pass_data_through_unmodified() {
        let list = people(vec![person(2, "B"), person(1, "A")], 7, 42);
        let props = MediaListProps::from_people(&list, "Popular People").unwrap();
        assert_eq!(props.current_page, 7);
        assert_eq!(props.total_pages, 42);
        assert_eq!(props.items, list.items.as_slice());
        assert_eq!(props.list_type, ListType::Grid);
        assert_eq!(props.items_type, ItemsType::People);
        assert!(props.show_pagination);

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["currentPage"], 7);
        assert_eq!(json["totalPages"], 42);
        assert_eq!(json["listType"], "grid");
        assert_eq!(json["itemsType"], "people");
    }

    #[test]
    fn page_window_is_bounded() {
        let list = people(vec![person(1, "A")], 1, 500);
        let props = MediaListProps::from_people(&list, "x").unwrap();
        assert_eq!(props.page_window(2), 1..=3);

        let list = people(vec![person(1, "A")], 1000, 5000);
        let props = MediaListProps::from_people(&list, "x").unwrap();
        assert_eq!(props.last_page(), 1000);
        assert_eq!(props.page_window(2), 998..=1000);
    }

    #[test]
    fn page_href_targets_listing_route() {
        assert_eq!(MediaListProps::page_href(4), "/people?page=4");
    }

    #[test]
    fn meta_lists_social_preview_fields_in_order() {
        let meta = PageMeta::popular_people("https://sora.example/");
        let keys: Vec<&str> = meta.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "title",
                "description",
                "keywords",
                "og:url",
                "og:title",
                "og:image",
                "og:description",
            ]
        );
        assert_eq!(meta.og_url, "https://sora.example/people");
        assert_eq!(meta.og_title, meta.title);

        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.starts_with("{\"title\":\"Discover most popular celebs on Sora\""));
    }

    #[test]
    fn transition_slides_in_and_fades_up() {
        let transition = Transition::for_location("/people?page=2");
        let json = serde_json::to_value(&transition).unwrap();
        assert_eq!(json["initial"], serde_json::json!({ "x": "-10%", "opacity": 0.0 }));
        assert_eq!(json["exit"], serde_json::json!({ "y": "-10%", "opacity": 0.0 }));
        assert_eq!(transition.key, "/people?page=2");
    }
}
