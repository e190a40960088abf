// src/api/mod.rs
//! Notion API interaction: everything the blog reads from a workspace.
//!
//! Business logic depends on the [`NotionRepository`] trait, never on HTTP
//! details, so services can be driven by stub repositories in tests.

pub mod block_fetcher;
pub mod client;
pub mod pagination;
pub mod parser;
pub mod post_adapter;
pub mod query;
pub mod responses;

use crate::error::AppError;
use crate::types::{BlockId, DataSourceId, NotionId};
use query::DataSourceQuery;
use responses::{BlockRecord, DatabaseRecord, PageRecord, PaginatedResponse};

/// The three Notion operations the blog consumes. Each call returns one
/// page of results; callers follow `next_cursor` themselves.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseRecord, AppError>;

    async fn query_data_source(
        &self,
        data_source: &DataSourceId,
        query: &DataSourceQuery,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<PageRecord>, AppError>;

    async fn list_block_children(
        &self,
        block: &BlockId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<BlockRecord>, AppError>;
}

pub use block_fetcher::fetch_block_tree;
pub use client::NotionHttpClient;
pub use post_adapter::map_page_to_post;
