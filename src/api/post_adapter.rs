// src/api/post_adapter.rs
//! Adapter layer converting raw data-source rows into [`Post`]s.
//!
//! Every property goes through a single match on its decoded type. The arm
//! that fits the expected type yields a value; every other arm yields
//! `None`. A renamed or retyped column therefore blanks one field of one
//! post instead of failing the page render.

use super::responses::{Cover, PageRecord, PersonEntry, PropertyValue, RichTextFragment};
use crate::constants::{
    PLACEHOLDER_TITLE, PROPERTY_AUTHOR, PROPERTY_DATE, PROPERTY_DESCRIPTION,
    PROPERTY_MODIFIED_DATE, PROPERTY_SLUG, PROPERTY_TAGS, PROPERTY_TITLE,
};
use crate::model::Post;

/// Convert one data-source row into a normalized post. Total and pure.
pub fn map_page_to_post(page: &PageRecord) -> Post {
    let date = extract_date(page);
    let modified_date = extract_modified_date(page);
    warn_on_unsortable_date(&page.id, date.as_deref().or(modified_date.as_deref()));

    Post {
        id: page.id.clone(),
        title: extract_title(page).unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
        description: extract_rich_text(page, PROPERTY_DESCRIPTION),
        cover_image: extract_cover(page),
        tags: extract_tags(page),
        author: extract_author(page),
        date,
        modified_date,
        slug: extract_rich_text(page, PROPERTY_SLUG).unwrap_or_else(|| page.id.clone()),
    }
}

/// Concatenates fragments, trims, and treats blank text as absent.
fn plain_text(fragments: &[RichTextFragment]) -> Option<String> {
    let text = fragments
        .iter()
        .map(|fragment| fragment.plain_text.as_str())
        .collect::<String>();
    non_empty(text.trim())
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn extract_title(page: &PageRecord) -> Option<String> {
    match page.property(PROPERTY_TITLE)? {
        PropertyValue::Title { title } => plain_text(&title),
        _ => None,
    }
}

fn extract_rich_text(page: &PageRecord, name: &str) -> Option<String> {
    match page.property(name)? {
        PropertyValue::RichText { rich_text } => plain_text(&rich_text),
        other => {
            log::debug!(
                "Property '{}' on page {} is not rich text ({:?})",
                name,
                page.id,
                other
            );
            None
        }
    }
}

fn extract_tags(page: &PageRecord) -> Option<Vec<String>> {
    let PropertyValue::MultiSelect { multi_select } = page.property(PROPERTY_TAGS)? else {
        return None;
    };

    let tags: Vec<String> = multi_select
        .into_iter()
        .filter_map(|option| option.name)
        .filter(|name| !name.is_empty())
        .collect();

    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

/// The first *user* in the people list; groups are skipped.
fn extract_author(page: &PageRecord) -> Option<String> {
    match page.property(PROPERTY_AUTHOR)? {
        PropertyValue::People { people } => people
            .into_iter()
            .find(|person: &PersonEntry| person.object == "user")
            .and_then(|user| user.name)
            .filter(|name| !name.is_empty()),
        _ => None,
    }
}

fn extract_date(page: &PageRecord) -> Option<String> {
    match page.property(PROPERTY_DATE)? {
        PropertyValue::Date { date } => date
            .and_then(|range| range.start)
            .filter(|start| !start.is_empty()),
        _ => None,
    }
}

fn extract_modified_date(page: &PageRecord) -> Option<String> {
    match page.property(PROPERTY_MODIFIED_DATE)? {
        PropertyValue::LastEditedTime { last_edited_time } => {
            last_edited_time.filter(|time| !time.is_empty())
        }
        _ => None,
    }
}

fn extract_cover(page: &PageRecord) -> Option<String> {
    match page.cover()? {
        Cover::External { external } => non_empty(&external.url),
        Cover::File { file } => non_empty(&file.url),
        Cover::Unsupported => None,
    }
}

/// Posts sort by comparing date strings, which only matches chronology when
/// every date is ISO-8601. Flag the ones that are not.
fn warn_on_unsortable_date(page_id: &str, date: Option<&str>) {
    let Some(date) = date else {
        return;
    };
    let is_iso = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(date).is_ok();
    if !is_iso {
        log::warn!(
            "Page {} has non ISO-8601 date '{}'; post ordering may be wrong",
            page_id,
            date
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn page(properties: Value) -> PageRecord {
        serde_json::from_value(json!({
            "object": "page",
            "id": "0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0",
            "cover": null,
            "properties": properties
        }))
        .unwrap()
    }

    fn text(fragments: &[&str]) -> Value {
        Value::Array(
            fragments
                .iter()
                .map(|t| json!({ "type": "text", "text": { "content": t }, "plain_text": t }))
                .collect(),
        )
    }

    #[test]
    fn maps_a_complete_row() {
        let mut record = page(json!({
            "Title": { "id": "title", "type": "title", "title": text(&["Hello, ", "Rust"]) },
            "Description": { "id": "d", "type": "rich_text", "rich_text": text(&["  A first post  "]) },
            "Tags": { "id": "t", "type": "multi_select", "multi_select": [
                { "id": "1", "name": "rust", "color": "red" },
                { "id": "2", "name": "notion", "color": "blue" }
            ]},
            "Author": { "id": "a", "type": "people", "people": [
                { "object": "group", "id": "g", "name": "Editors" },
                { "object": "user", "id": "u", "name": "won" }
            ]},
            "Date": { "id": "dt", "type": "date", "date": { "start": "2025-03-01", "end": null } },
            "Modified Date": { "id": "m", "type": "last_edited_time", "last_edited_time": "2025-03-04T10:00:00.000Z" },
            "Slug": { "id": "s", "type": "rich_text", "rich_text": text(&["hello-rust"]) }
        }));
        record.cover = Some(json!({ "type": "external", "external": { "url": "https://picsum.photos/800" } }));

        let post = map_page_to_post(&record);

        assert_eq!(
            post,
            Post {
                id: "0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0".to_string(),
                title: "Hello, Rust".to_string(),
                description: Some("A first post".to_string()),
                cover_image: Some("https://picsum.photos/800".to_string()),
                tags: Some(vec!["rust".to_string(), "notion".to_string()]),
                author: Some("won".to_string()),
                date: Some("2025-03-01".to_string()),
                modified_date: Some("2025-03-04T10:00:00.000Z".to_string()),
                slug: "hello-rust".to_string(),
            }
        );
    }

    #[test]
    fn missing_or_blank_title_uses_placeholder() {
        assert_eq!(map_page_to_post(&page(json!({}))).title, PLACEHOLDER_TITLE);

        let blank = page(json!({ "Title": { "type": "title", "title": text(&["   "]) } }));
        assert_eq!(map_page_to_post(&blank).title, PLACEHOLDER_TITLE);

        let empty = page(json!({ "Title": { "type": "title", "title": [] } }));
        assert_eq!(map_page_to_post(&empty).title, PLACEHOLDER_TITLE);
    }

    #[test]
    fn wrong_property_types_degrade_to_absent() {
        let record = page(json!({
            "Title": { "type": "rich_text", "rich_text": text(&["not a title column"]) },
            "Description": { "type": "select", "select": { "name": "oops" } },
            "Tags": { "type": "select", "select": { "name": "rust" } },
            "Author": { "type": "created_by", "created_by": { "object": "user", "id": "u" } },
            "Date": { "type": "rich_text", "rich_text": text(&["yesterday"]) },
            "Slug": { "type": "title", "title": text(&["slug"]) }
        }));

        let post = map_page_to_post(&record);

        assert_eq!(post.title, PLACEHOLDER_TITLE);
        assert_eq!(post.description, None);
        assert_eq!(post.tags, None);
        assert_eq!(post.author, None);
        assert_eq!(post.date, None);
        assert_eq!(post.slug, record.id);
    }

    #[test]
    fn empty_tags_are_none_and_blank_names_dropped() {
        let none = page(json!({ "Tags": { "type": "multi_select", "multi_select": [] } }));
        assert_eq!(map_page_to_post(&none).tags, None);

        let blanks = page(json!({ "Tags": { "type": "multi_select", "multi_select": [
            { "name": "" }, { "name": "b" }, { "name": "a" }
        ]}}));
        assert_eq!(
            map_page_to_post(&blanks).tags,
            Some(vec!["b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn author_requires_a_named_user() {
        let groups_only = page(json!({ "Author": { "type": "people", "people": [
            { "object": "group", "name": "Team" }
        ]}}));
        assert_eq!(map_page_to_post(&groups_only).author, None);

        let nameless = page(json!({ "Author": { "type": "people", "people": [
            { "object": "user", "id": "u1" },
            { "object": "user", "id": "u2", "name": "second" }
        ]}}));
        assert_eq!(map_page_to_post(&nameless).author, None);
    }

    #[test]
    fn file_covers_use_signed_url() {
        let mut record = page(json!({}));
        record.cover = Some(json!({
            "type": "file",
            "file": { "url": "https://prod-files-secure.s3.amazonaws.com/x.png?sig=1", "expiry_time": "2025-01-01T00:00:00.000Z" }
        }));
        assert_eq!(
            map_page_to_post(&record).cover_image.as_deref(),
            Some("https://prod-files-secure.s3.amazonaws.com/x.png?sig=1")
        );

        record.cover = Some(json!({ "type": "emoji", "emoji": "🦀" }));
        assert_eq!(map_page_to_post(&record).cover_image, None);
    }

    #[test]
    fn blank_slug_falls_back_to_id() {
        let record = page(json!({ "Slug": { "type": "rich_text", "rich_text": text(&[" "]) } }));
        assert_eq!(map_page_to_post(&record).slug, record.id);
    }

    #[test]
    fn mapping_is_idempotent() {
        let record = page(json!({
            "Title": { "type": "title", "title": text(&["Same"]) },
            "Tags": { "type": "multi_select", "multi_select": [{ "name": "x" }] }
        }));
        assert_eq!(map_page_to_post(&record), map_page_to_post(&record));
    }
}
