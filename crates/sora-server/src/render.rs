//! Server-side HTML rendering of the popular people page.

use serde::Serialize;
use sora_core::{Locale, Person};

use crate::services::i18n::Translations;
use crate::view::{Breadcrumb, MediaListProps, PageMeta, PeopleView, Transition};

const PROFILE_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w185";
const PAGINATION_RADIUS: u32 = 2;

/// Layout styles shared by every listing page.
const PAGE_STYLES: &str = r#"
.container.fluid {
    display: flex;
    justify-content: center;
}

@media (max-width: 650px) {
    .container.fluid {
        padding-left: 0.75rem;
        padding-right: 0.75rem;
    }
}

.media-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(164px, 1fr));
    gap: 1rem;
    list-style: none;
    padding: 0;
}
"#;

/// Renders the full HTML document.
pub fn render_document(
    meta: &PageMeta,
    breadcrumb: &Breadcrumb,
    view: &PeopleView<'_>,
    locale: &Locale,
    translations: &Translations,
) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"");
    html.push_str(&html_escape(locale.as_str()));
    html.push_str("\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n");
    render_meta(&mut html, meta);
    render_styles(&mut html, &view.transition);
    html.push_str("</head>\n<body>\n");

    html.push_str("<nav class=\"breadcrumbs\"><a href=\"");
    html.push_str(&html_escape(breadcrumb.href));
    html.push_str("\" aria-label=\"");
    html.push_str(&html_escape(breadcrumb.aria_label));
    html.push_str("\">");
    html.push_str(&html_escape(breadcrumb.label));
    html.push_str("</a></nav>\n");

    render_transition_open(&mut html, &view.transition);
    html.push_str("<main class=\"container fluid\">\n");
    if let Some(list) = &view.media_list {
        render_media_list(&mut html, list, locale, translations);
    }
    html.push_str("</main>\n</div>\n</body>\n</html>\n");
    html
}

fn render_meta(html: &mut String, meta: &PageMeta) {
    for (key, value) in meta.entries() {
        if key == "title" {
            html.push_str("<title>");
            html.push_str(&html_escape(value));
            html.push_str("</title>\n");
            continue;
        }
        let attr = if key.starts_with("og:") { "property" } else { "name" };
        html.push_str("<meta ");
        html.push_str(attr);
        html.push_str("=\"");
        html.push_str(&html_escape(key));
        html.push_str("\" content=\"");
        html.push_str(&html_escape(value));
        html.push_str("\">\n");
    }
}

fn render_styles(html: &mut String, transition: &Transition) {
    html.push_str("<style>\n");
    html.push_str(&format!(
        "@keyframes page-enter {{\n    from {{ transform: translateX({}); opacity: {}; }}\n",
        transition.initial.x.unwrap_or("0"),
        transition.initial.opacity
    ));
    html.push_str(&format!(
        "    to {{ transform: translateX({}); opacity: {}; }}\n}}\n",
        transition.animate.x.unwrap_or("0"),
        transition.animate.opacity
    ));
    html.push_str(&format!(
        ".page-transition {{ animation: page-enter {}s ease-out both; }}\n",
        transition.duration
    ));
    html.push_str(PAGE_STYLES);
    html.push_str("</style>\n");
}

fn render_transition_open(html: &mut String, transition: &Transition) {
    html.push_str("<div class=\"page-transition\" data-motion-key=\"");
    html.push_str(&html_escape(&transition.key));
    html.push_str("\" data-motion-initial=\"");
    html.push_str(&json_attr(&transition.initial));
    html.push_str("\" data-motion-animate=\"");
    html.push_str(&json_attr(&transition.animate));
    html.push_str("\" data-motion-exit=\"");
    html.push_str(&json_attr(&transition.exit));
    html.push_str("\" data-motion-duration=\"");
    html.push_str(&transition.duration.to_string());
    html.push_str("\">\n");
}

fn render_media_list(
    html: &mut String,
    list: &MediaListProps<'_>,
    locale: &Locale,
    translations: &Translations,
) {
    html.push_str(
        "<section class=\"media-list\" data-list-type=\"grid\" data-items-type=\"people\">\n",
    );
    html.push_str("<h2>");
    html.push_str(&html_escape(&list.list_name));
    html.push_str("</h2>\n<ul class=\"media-grid\">\n");

    let known_for_label = translations.t(locale, "knownFor");
    for person in list.items {
        render_person(html, person, &known_for_label);
    }
    html.push_str("</ul>\n");

    if list.show_pagination {
        render_pagination(html, list, locale, translations);
    }
    html.push_str("</section>\n");
}

fn render_person(html: &mut String, person: &Person, known_for_label: &str) {
    html.push_str(&format!("<li class=\"media-card\" data-id=\"{}\">\n", person.id));
    if let Some(path) = person.profile_path() {
        html.push_str("<img src=\"");
        html.push_str(PROFILE_IMAGE_BASE);
        html.push_str(&html_escape(path));
        html.push_str("\" alt=\"");
        html.push_str(&html_escape(&person.name));
        html.push_str("\" loading=\"lazy\">\n");
    }
    html.push_str("<h3>");
    html.push_str(&html_escape(&person.name));
    html.push_str("</h3>\n");
    if let Some(department) = person.known_for_department() {
        html.push_str("<p class=\"department\">");
        html.push_str(&html_escape(department));
        html.push_str("</p>\n");
    }

    let known_for = person.known_for();
    let titles: Vec<String> = known_for
        .iter()
        .filter_map(|k| k.display_title())
        .map(html_escape)
        .collect();
    if !titles.is_empty() {
        html.push_str("<p class=\"known-for\">");
        html.push_str(&html_escape(known_for_label));
        html.push_str(": ");
        html.push_str(&titles.join(", "));
        html.push_str("</p>\n");
    }
    html.push_str("</li>\n");
}

fn render_pagination(
    html: &mut String,
    list: &MediaListProps<'_>,
    locale: &Locale,
    translations: &Translations,
) {
    let current = list.current_page;
    let last = list.last_page();

    html.push_str("<nav class=\"pagination\" aria-label=\"pagination\">\n");
    if current > 1 {
        page_link(html, Some("prev"), current - 1, &translations.t(locale, "previous"));
    }
    for page in list.page_window(PAGINATION_RADIUS) {
        if page == current {
            html.push_str(&format!("<span aria-current=\"page\">{}</span>\n", page));
        } else {
            page_link(html, None, page, &page.to_string());
        }
    }
    if current < last {
        page_link(html, Some("next"), current + 1, &translations.t(locale, "next"));
    }
    html.push_str("</nav>\n");
}

fn page_link(html: &mut String, rel: Option<&str>, page: u32, label: &str) {
    html.push_str("<a ");
    if let Some(rel) = rel {
        html.push_str("rel=\"");
        html.push_str(rel);
        html.push_str("\" ");
    }
    html.push_str("href=\"");
    html.push_str(&MediaListProps::page_href(page));
    html.push_str("\">");
    html.push_str(&html_escape(label));
    html.push_str("</a>\n");
}

/// JSON-encodes a value for a double-quoted data attribute.
fn json_attr<T: Serialize>(value: &T) -> String {
    html_escape(&serde_json::to_string(value).unwrap_or_default())
}

/// Escapes text for HTML content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
