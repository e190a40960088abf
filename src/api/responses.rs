// src/api/responses.rs
//! Wire-level records returned by the Notion API.
//!
//! Nothing here fails a whole response because of one odd record. Blocks are
//! decoded one at a time through notion-client's serde types and fall back to
//! an opaque [`BlockRecord`] when the library does not know their type. Page
//! records are kept close to raw JSON: the posts database schema is
//! user-editable, so each property is decoded on its own into
//! [`PropertyValue`] and anything that does not fit degrades to
//! [`PropertyValue::Unsupported`].

use notion_client::objects::block::{Block, BlockType};
use notion_client::objects::rich_text::RichText;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::collections::HashMap;

pub use notion_client::objects::error::Error as NotionError;

/// Generic paginated response from the Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A page of results followed by `next_cursor`, or the last page when `None`.
    pub fn new(results: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            object: "list".to_string(),
            has_more: next_cursor.is_some(),
            results,
            next_cursor,
        }
    }
}

/// Response of `GET /databases/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseRecord {
    pub id: String,
    #[serde(default)]
    pub data_sources: Vec<DataSourceRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of a block-children listing.
///
/// `block_type` is `None` when notion-client cannot decode the block (a type
/// it does not model yet). Such blocks still carry their id and
/// `has_children`, so their subtree is fetched and rendered.
#[derive(Debug, Clone)]
pub struct BlockRecord {
    pub id: Option<String>,
    pub has_children: bool,
    /// Notion's `type` tag, e.g. `paragraph` or `audio`.
    pub kind: String,
    pub block_type: Option<BlockType>,
    /// Media caption, read from the raw payload since not every typed value exposes it.
    pub caption: Vec<RichText>,
}

impl BlockRecord {
    /// Decodes one raw block, never failing.
    ///
    /// Rich text fragments notion-client cannot read (new mention kinds) are
    /// downgraded to plain text before giving up on the typed block.
    pub fn decode(mut raw: Value) -> Self {
        let id = raw.get("id").and_then(Value::as_str).map(str::to_string);
        let has_children = raw
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let caption = raw
            .get(kind.as_str())
            .and_then(|payload| payload.get("caption"))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(decode_rich_text).collect())
            .unwrap_or_default();

        let block_type = match serde_json::from_value::<Block>(raw.clone()) {
            Ok(block) => Some(block.block_type),
            Err(_) => {
                if let Some(payload) = raw.get_mut(kind.as_str()) {
                    downgrade_rich_text(payload);
                }
                match serde_json::from_value::<Block>(raw) {
                    Ok(block) => {
                        log::debug!("Block {:?} rendered with plain-text fallbacks", id);
                        Some(block.block_type)
                    }
                    Err(e) => {
                        log::debug!(
                            "Block {:?} of type '{}' is not understood ({}); rendering it empty",
                            id,
                            kind,
                            e
                        );
                        None
                    }
                }
            }
        };

        Self {
            id,
            has_children,
            kind,
            block_type,
            caption,
        }
    }
}

impl<'de> Deserialize<'de> for BlockRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(BlockRecord::decode)
    }
}

fn decode_rich_text(item: &Value) -> Option<RichText> {
    serde_json::from_value(item.clone())
        .or_else(|_| serde_json::from_value(plain_text_fragment(item)))
        .ok()
}

/// Replaces unreadable fragments in `rich_text`, `caption` and table `cells`
/// with text fragments carrying the same `plain_text`.
fn downgrade_rich_text(payload: &mut Value) {
    for field in ["rich_text", "caption"] {
        if let Some(Value::Array(items)) = payload.get_mut(field) {
            downgrade_fragments(items);
        }
    }
    if let Some(Value::Array(cells)) = payload.get_mut("cells") {
        for cell in cells.iter_mut() {
            if let Value::Array(items) = cell {
                downgrade_fragments(items);
            }
        }
    }
}

fn downgrade_fragments(items: &mut [Value]) {
    for item in items.iter_mut() {
        if serde_json::from_value::<RichText>(item.clone()).is_err() {
            *item = plain_text_fragment(item);
        }
    }
}

fn plain_text_fragment(item: &Value) -> Value {
    let text = item
        .get("plain_text")
        .and_then(Value::as_str)
        .unwrap_or_default();
    json!({
        "type": "text",
        "text": { "content": text, "link": null },
        "annotations": item.get("annotations").cloned().unwrap_or_else(|| json!({
            "bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "default"
        })),
        "plain_text": text,
        "href": item.get("href").cloned().unwrap_or(Value::Null)
    })
}

/// One row of a data source query: a page with raw properties.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageRecord {
    pub id: String,
    #[serde(default)]
    pub cover: Option<Value>,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl PageRecord {
    /// Decodes the named property, `None` when the page has no such property.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).map(PropertyValue::decode)
    }

    /// Decodes the page cover, `None` when the page has none.
    pub fn cover(&self) -> Option<Cover> {
        self.cover
            .as_ref()
            .filter(|raw| !raw.is_null())
            .map(Cover::decode)
    }
}

/// The property shapes the blog reads, tagged by Notion's `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichTextFragment>,
    },
    RichText {
        rich_text: Vec<RichTextFragment>,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    People {
        people: Vec<PersonEntry>,
    },
    Date {
        date: Option<DateRange>,
    },
    LastEditedTime {
        last_edited_time: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Decodes one raw property; shapes that do not match any arm become `Unsupported`.
    pub fn decode(raw: &Value) -> Self {
        match serde_json::from_value(raw.clone()) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Unreadable property payload ({}), treating as absent", e);
                PropertyValue::Unsupported
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichTextFragment {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: Option<String>,
}

/// A people-property entry: either a user or a group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonEntry {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
}

/// Page cover image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cover {
    External {
        external: FileUrl,
    },
    /// Notion-hosted file; the URL is signed and expires.
    File {
        file: FileUrl,
    },
    #[serde(other)]
    Unsupported,
}

impl Cover {
    pub fn decode(raw: &Value) -> Self {
        serde_json::from_value(raw.clone()).unwrap_or(Cover::Unsupported)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileUrl {
    pub url: String,
}
