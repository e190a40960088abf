// src/services/tags.rs
//! Tag filter list with per-tag post counts.

use super::BlogService;
use crate::constants::{ALL_TAG_ID, ALL_TAG_NAME};
use crate::error::AppError;
use crate::model::{Post, TagFilterItem};
use indexmap::IndexMap;
use std::cmp::Ordering;

impl BlogService {
    /// The all-tag followed by every tag used on a published post.
    pub async fn tags(&self) -> Result<Vec<TagFilterItem>, AppError> {
        let posts = self.published_posts(None).await?;
        Ok(aggregate_tags(&posts))
    }
}

/// Counts tag occurrences across `posts`.
///
/// The first entry is always the all-tag carrying the total number of posts
/// (not the sum of tag counts). The rest are sorted by name, ignoring case
/// first so that `apple` and `Banana` interleave the way a reader expects.
pub fn aggregate_tags(posts: &[Post]) -> Vec<TagFilterItem> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for tag in posts.iter().flat_map(|post| post.tags()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut tags: Vec<TagFilterItem> = counts
        .into_iter()
        .map(|(name, count)| TagFilterItem {
            id: name.to_string(),
            name: name.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| compare_names(&a.name, &b.name));

    let mut items = Vec::with_capacity(tags.len() + 1);
    items.push(TagFilterItem {
        id: ALL_TAG_ID.to_string(),
        name: ALL_TAG_NAME.to_string(),
        count: posts.len(),
    });
    items.extend(tags);
    items
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tagged(tags: &[&str]) -> Post {
        Post {
            id: "p".to_string(),
            title: "p".to_string(),
            description: None,
            cover_image: None,
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(|t| t.to_string()).collect())
            },
            author: None,
            date: None,
            modified_date: None,
            slug: "p".to_string(),
        }
    }

    fn item(id: &str, name: &str, count: usize) -> TagFilterItem {
        TagFilterItem {
            id: id.to_string(),
            name: name.to_string(),
            count,
        }
    }

    #[test]
    fn counts_tags_behind_the_all_tag() {
        let posts = vec![tagged(&["b", "a"]), tagged(&["a"]), tagged(&[])];
        assert_eq!(
            aggregate_tags(&posts),
            vec![item("all", "전체", 3), item("a", "a", 2), item("b", "b", 1)]
        );
    }

    #[test]
    fn no_posts_yields_only_the_all_tag() {
        assert_eq!(aggregate_tags(&[]), vec![item("all", "전체", 0)]);
    }

    #[test]
    fn names_sort_case_insensitively() {
        let posts = vec![tagged(&["rust", "Notion", "async", "Rust"])];
        let names: Vec<String> = aggregate_tags(&posts)
            .into_iter()
            .skip(1)
            .map(|tag| tag.name)
            .collect();
        assert_eq!(names, vec!["async", "Notion", "Rust", "rust"]);
    }
}
