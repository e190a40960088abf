// src/services/mod.rs
//! The blog's read operations: post listing, tag counts and post detail.
//!
//! [`BlogService`] owns nothing but an injected repository and the database
//! id; every call goes straight to Notion.

mod detail;
mod posts;
mod tags;

pub use posts::sort_posts;
pub use tags::aggregate_tags;

use crate::api::pagination::fetch_all_pages;
use crate::api::query::DataSourceQuery;
use crate::api::responses::PageRecord;
use crate::api::NotionRepository;
use crate::error::AppError;
use crate::types::{DataSourceId, NotionId};
use std::sync::Arc;

/// Entry point for the blog's content operations.
#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn NotionRepository>,
    database_id: NotionId,
}

impl BlogService {
    pub fn new(repo: Arc<dyn NotionRepository>, database_id: NotionId) -> Self {
        Self { repo, database_id }
    }

    /// Resolves the posts database to its first data source.
    async fn data_source_id(&self) -> Result<DataSourceId, AppError> {
        let database = self.repo.retrieve_database(&self.database_id).await?;
        let first = database.data_sources.first().ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "Database {} has no data sources",
                self.database_id
            ))
        })?;
        if database.data_sources.len() > 1 {
            log::debug!(
                "Database {} has {} data sources; using '{}'",
                self.database_id,
                database.data_sources.len(),
                first.name.as_deref().unwrap_or(&first.id)
            );
        }
        Ok(DataSourceId::parse(&first.id)?)
    }

    /// Runs `query` against the posts data source, following every cursor.
    async fn query_pages(&self, query: &DataSourceQuery) -> Result<Vec<PageRecord>, AppError> {
        let data_source = self.data_source_id().await?;
        let repo = self.repo.as_ref();
        let data_source = &data_source;
        let pages = fetch_all_pages(move |cursor| {
            repo.query_data_source(data_source, query, cursor)
        })
        .await?;
        Ok(pages.items)
    }
}

/// Logs a failed operation with its Notion error code, if any, and hands the
/// error back for propagation.
fn log_failure(operation: &str, err: AppError) -> AppError {
    match err.notion_code() {
        Some(code) => log::error!("{} failed [{}]: {}", operation, code, err),
        None => log::error!("{} failed: {}", operation, err),
    }
    err
}
