// src/lib.rs
//! notion-blog library: reads a blog's posts, tags and post bodies from a
//! Notion database.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Services**: `BlogService` with `published_posts`, `tags`, `post_by_slug`
//! - **Pure helpers**: `map_page_to_post`, `aggregate_tags`, `sort_posts`,
//!   `convert_block_tree`, `blocks_to_markdown`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `fetch_block_tree`
//! - **Domain model**: `Post`, `TagFilterItem`, `PostDetail`, `BlockNode`, `MarkdownBlock`
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod services;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{BlogCommand, BlogConfig, CommandLineInput};

// --- Domain Model ---
pub use crate::model::{BlockNode, MarkdownBlock, Post, PostDetail, SortOrder, TagFilterItem};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, DataSourceId, NotionId, ValidatedUrl};

// --- API Client ---
pub use crate::api::{fetch_block_tree, map_page_to_post, NotionHttpClient, NotionRepository};

// --- Formatting ---
pub use crate::formatting::{blocks_to_markdown, convert_block_tree};

// --- Services ---
pub use crate::services::{aggregate_tags, sort_posts, BlogService};
