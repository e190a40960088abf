// src/services/detail.rs
//! Single post lookup with its rendered body.

use super::{log_failure, BlogService};
use crate::api::query::DataSourceQuery;
use crate::api::{fetch_block_tree, map_page_to_post};
use crate::error::AppError;
use crate::formatting::{blocks_to_markdown, convert_block_tree};
use crate::model::PostDetail;
use crate::types::BlockId;
use std::sync::Arc;

impl BlogService {
    /// The published post whose slug is `slug`, with its content as markdown lines.
    ///
    /// Returns [`AppError::PostNotFound`] when no published post matches.
    pub async fn post_by_slug(&self, slug: &str) -> Result<PostDetail, AppError> {
        self.load_post(slug).await.map_err(|err| {
            if err.is_not_found() {
                log::info!("No published post with slug '{}'", slug);
                err
            } else {
                log_failure(&format!("Loading post '{}'", slug), err)
            }
        })
    }

    async fn load_post(&self, slug: &str) -> Result<PostDetail, AppError> {
        let pages = self.query_pages(&DataSourceQuery::post_by_slug(slug)).await?;
        let page = pages.first().ok_or_else(|| AppError::PostNotFound {
            slug: slug.to_string(),
        })?;
        if pages.len() > 1 {
            log::warn!(
                "Slug '{}' matches {} published posts; using {}",
                slug,
                pages.len(),
                page.id
            );
        }

        let metadata = map_page_to_post(page);
        let root = BlockId::parse(&page.id)?;
        let tree = fetch_block_tree(Arc::clone(&self.repo), &root).await?;
        let content = blocks_to_markdown(&convert_block_tree(&tree), 0);

        Ok(PostDetail { metadata, content })
    }
}
