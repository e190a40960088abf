//! Shared fixtures: an in-memory Notion repository and JSON builders for
//! pages and blocks shaped like real API responses.

#![allow(dead_code)]

use notion_blog::api::query::DataSourceQuery;
use notion_blog::api::responses::{
    BlockRecord, DataSourceRef, DatabaseRecord, PageRecord, PaginatedResponse,
};
use notion_blog::{AppError, BlockId, DataSourceId, NotionErrorCode, NotionId, NotionRepository};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const DATABASE_ID: &str = "1429989fe8ac4effbc8f57f56486db54";
pub const DATA_SOURCE_ID: &str = "248104cd-477e-80af-bc30-000bd28de8f9";

/// Serves canned pages and block children, recording every query it gets.
#[derive(Default)]
pub struct StubRepository {
    data_sources: Vec<DataSourceRef>,
    /// Query results, one inner vec per response page.
    query_pages: Vec<Vec<PageRecord>>,
    /// Block children by canonical block id, one inner vec per response page.
    children: HashMap<String, Vec<Vec<BlockRecord>>>,
    delays: HashMap<String, Duration>,
    failing_blocks: HashSet<String>,
    failing_database: bool,
    pub queries: Mutex<Vec<DataSourceQuery>>,
    pub block_calls: Mutex<Vec<(String, Option<String>)>>,
    in_flight: AtomicUsize,
    /// Most block-children requests ever served at the same time.
    peak_in_flight: AtomicUsize,
}

impl StubRepository {
    pub fn new() -> Self {
        Self {
            data_sources: vec![DataSourceRef {
                id: DATA_SOURCE_ID.to_string(),
                name: Some("Posts".to_string()),
            }],
            ..Self::default()
        }
    }

    pub fn without_data_sources(mut self) -> Self {
        self.data_sources.clear();
        self
    }

    pub fn with_pages(mut self, pages: Vec<PageRecord>) -> Self {
        self.query_pages.push(pages);
        self
    }

    pub fn with_children(mut self, parent: &str, blocks: Vec<BlockRecord>) -> Self {
        self.children.entry(key(parent)).or_default().push(blocks);
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn with_delay(mut self, parent: &str, delay: Duration) -> Self {
        self.delays.insert(key(parent), delay);
        self
    }

    pub fn failing_children_of(mut self, parent: &str) -> Self {
        self.failing_blocks.insert(key(parent));
        self
    }

    pub fn failing_database(mut self) -> Self {
        self.failing_database = true;
        self
    }

    pub fn recorded_queries(&self) -> Vec<Value> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|query| serde_json::to_value(query).unwrap())
            .collect()
    }
}

fn key(id: &str) -> String {
    BlockId::parse(id).unwrap().as_str().to_string()
}

fn cursor_index(cursor: Option<String>) -> usize {
    cursor
        .and_then(|c| c.strip_prefix("cursor-").map(str::to_string))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn paged<T: Clone>(pages: &[Vec<T>], index: usize) -> PaginatedResponse<T> {
    let results = pages.get(index).cloned().unwrap_or_default();
    let next = (index + 1 < pages.len()).then(|| format!("cursor-{}", index + 1));
    PaginatedResponse::new(results, next)
}

#[async_trait::async_trait]
impl NotionRepository for StubRepository {
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseRecord, AppError> {
        if self.failing_database {
            return Err(AppError::NotionService {
                code: NotionErrorCode::Unauthorized,
                message: "API token is invalid.".to_string(),
                status: reqwest::StatusCode::UNAUTHORIZED,
            });
        }
        Ok(DatabaseRecord {
            id: id.to_hyphenated(),
            data_sources: self.data_sources.clone(),
        })
    }

    async fn query_data_source(
        &self,
        _data_source: &DataSourceId,
        query: &DataSourceQuery,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<PageRecord>, AppError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(paged(&self.query_pages, cursor_index(cursor)))
    }

    async fn list_block_children(
        &self,
        block: &BlockId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<BlockRecord>, AppError> {
        self.block_calls
            .lock()
            .unwrap()
            .push((block.as_str().to_string(), cursor.clone()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(block.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_blocks.contains(block.as_str()) {
            return Err(AppError::NotionService {
                code: NotionErrorCode::ObjectNotFound,
                message: format!("Could not find block with ID: {}.", block.to_dashed()),
                status: reqwest::StatusCode::NOT_FOUND,
            });
        }

        let pages = self.children.get(block.as_str()).cloned().unwrap_or_default();
        Ok(paged(&pages, cursor_index(cursor)))
    }
}

// --- Pages ---

pub fn rich_text(content: &str) -> Value {
    json!([{
        "type": "text",
        "text": { "content": content, "link": null },
        "annotations": {
            "bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "default"
        },
        "plain_text": content,
        "href": null
    }])
}

/// A published post row. `date` is the Date property; tags may be empty.
pub fn post_page(id: &str, title: &str, slug: &str, date: Option<&str>, tags: &[&str]) -> PageRecord {
    let tag_options: Vec<Value> = tags
        .iter()
        .map(|name| json!({ "id": format!("opt-{}", name), "name": name, "color": "default" }))
        .collect();
    let date = match date {
        Some(start) => json!({ "start": start, "end": null, "time_zone": null }),
        None => Value::Null,
    };

    serde_json::from_value(json!({
        "object": "page",
        "id": id,
        "created_time": "2025-01-01T00:00:00.000Z",
        "last_edited_time": "2025-01-02T00:00:00.000Z",
        "cover": null,
        "archived": false,
        "properties": {
            "Title": { "id": "title", "type": "title", "title": rich_text(title) },
            "Slug": { "id": "slug", "type": "rich_text", "rich_text": rich_text(slug) },
            "Status": { "id": "st", "type": "select", "select": { "id": "p", "name": "Published", "color": "green" } },
            "Tags": { "id": "tg", "type": "multi_select", "multi_select": tag_options },
            "Date": { "id": "dt", "type": "date", "date": date },
            "Modified Date": { "id": "md", "type": "last_edited_time", "last_edited_time": "2025-01-02T00:00:00.000Z" }
        },
        "url": format!("https://www.notion.so/{}", id.replace('-', ""))
    }))
    .unwrap()
}

// --- Blocks ---

pub fn block(id: &str, kind: &str, payload: Value, has_children: bool) -> BlockRecord {
    let mut raw = json!({
        "object": "block",
        "id": id,
        "parent": { "type": "page_id", "page_id": "59833787-2cf9-4fdf-8782-e53db20768a5" },
        "created_time": "2025-03-01T10:00:00.000Z",
        "last_edited_time": "2025-03-01T10:00:00.000Z",
        "created_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
        "last_edited_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
        "has_children": has_children,
        "archived": false,
        "in_trash": false,
        "type": kind
    });
    raw[kind] = payload;
    serde_json::from_value(raw).unwrap()
}

pub fn paragraph(id: &str, text: &str) -> BlockRecord {
    block(
        id,
        "paragraph",
        json!({ "rich_text": rich_text(text), "color": "default" }),
        false,
    )
}

pub fn bullet(id: &str, text: &str, has_children: bool) -> BlockRecord {
    block(
        id,
        "bulleted_list_item",
        json!({ "rich_text": rich_text(text), "color": "default" }),
        has_children,
    )
}

pub fn heading(id: &str, text: &str) -> BlockRecord {
    block(
        id,
        "heading_1",
        json!({ "rich_text": rich_text(text), "color": "default", "is_toggleable": false }),
        false,
    )
}

pub fn audio(id: &str, url: &str) -> BlockRecord {
    block(
        id,
        "audio",
        json!({ "caption": [], "type": "external", "external": { "url": url } }),
        false,
    )
}

/// Test ids: `uuid(7)` → `00000000-0000-4000-8000-000000000007`.
pub fn uuid(n: u32) -> String {
    format!("00000000-0000-4000-8000-{:012}", n)
}
