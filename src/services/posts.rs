// src/services/posts.rs
//! Published post listing.

use super::{log_failure, BlogService};
use crate::api::map_page_to_post;
use crate::api::query::DataSourceQuery;
use crate::error::AppError;
use crate::model::{Post, SortOrder};

impl BlogService {
    /// Every published post, optionally narrowed to `tag`, newest first.
    ///
    /// The all-tag name behaves like `None`.
    pub async fn published_posts(&self, tag: Option<&str>) -> Result<Vec<Post>, AppError> {
        let query = DataSourceQuery::published_posts(tag);
        let pages = self
            .query_pages(&query)
            .await
            .map_err(|err| log_failure("Fetching published posts", err))?;

        let mut posts: Vec<Post> = pages.iter().map(map_page_to_post).collect();
        sort_posts(&mut posts, SortOrder::Latest);

        log::debug!(
            "Loaded {} published post(s){}",
            posts.len(),
            tag.map(|t| format!(" for tag '{}'", t)).unwrap_or_default()
        );
        Ok(posts)
    }
}

/// Orders posts by date, falling back to modified date.
///
/// Keys compare as plain strings; ISO-8601 dates therefore sort
/// chronologically. The sort is stable, so ties keep their incoming order.
pub fn sort_posts(posts: &mut [Post], order: SortOrder) {
    match order {
        SortOrder::Latest => posts.sort_by(|a, b| b.sort_key().cmp(a.sort_key())),
        SortOrder::Oldest => posts.sort_by(|a, b| a.sort_key().cmp(b.sort_key())),
    }
}
