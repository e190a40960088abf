// src/api/block_fetcher.rs
//! Recursive retrieval of a document's block tree.
//!
//! Children of one parent are paged through sequentially. Sibling subtrees
//! are expanded concurrently on a `JoinSet`; every task reports the index of
//! the block it expanded and the result lands in that slot, so the tree
//! comes back in source order whatever order the tasks finish in.
//!
//! A semaphore shared by the whole fetch caps how many children requests are
//! in flight. A permit is held for one request only, never across the
//! expansion of a subtree, so deep trees cannot starve themselves.

use super::pagination::fetch_all_pages;
use super::responses::BlockRecord;
use super::NotionRepository;
use crate::constants::{NOTION_MAX_CONCURRENT_FETCHES, NOTION_MAX_FETCH_DEPTH};
use crate::error::AppError;
use crate::model::BlockNode;
use crate::types::BlockId;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fetches every child block of `root`, each expanded with its own children.
///
/// Any failure anywhere in the tree fails the whole call; sibling tasks still
/// in flight are aborted.
pub async fn fetch_block_tree(
    repo: Arc<dyn NotionRepository>,
    root: &BlockId,
) -> Result<Vec<BlockNode>, AppError> {
    log::debug!("Fetching block tree for {}", root);
    let limiter = Arc::new(Semaphore::new(NOTION_MAX_CONCURRENT_FETCHES));
    expand_children(repo, limiter, root.clone(), 0).await
}

fn expand_children(
    repo: Arc<dyn NotionRepository>,
    limiter: Arc<Semaphore>,
    parent: BlockId,
    depth: usize,
) -> BoxFuture<'static, Result<Vec<BlockNode>, AppError>> {
    async move {
        if depth > NOTION_MAX_FETCH_DEPTH {
            return Err(AppError::RecursionLimitExceeded(NOTION_MAX_FETCH_DEPTH));
        }

        let blocks = list_all_children(repo.as_ref(), &limiter, &parent).await?;

        let mut tasks = JoinSet::new();
        for (index, block) in blocks.iter().enumerate() {
            if !block.has_children {
                continue;
            }
            let child = nested_block_id(block)?;
            let repo = Arc::clone(&repo);
            let limiter = Arc::clone(&limiter);
            tasks.spawn(async move {
                (index, expand_children(repo, limiter, child, depth + 1).await)
            });
        }

        let mut slots: Vec<Option<Vec<BlockNode>>> = (0..blocks.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, children) = joined?;
            slots[index] = Some(children?);
        }

        Ok(blocks
            .into_iter()
            .zip(slots)
            .map(|(block, children)| BlockNode { block, children })
            .collect())
    }
    .boxed()
}

async fn list_all_children(
    repo: &dyn NotionRepository,
    limiter: &Semaphore,
    parent: &BlockId,
) -> Result<Vec<BlockRecord>, AppError> {
    let pages = fetch_all_pages(move |cursor| async move {
        let _permit = limiter.acquire().await?;
        repo.list_block_children(parent, cursor).await
    })
    .await?;
    log::debug!(
        "Block {} has {} direct children ({} page(s))",
        parent,
        pages.items.len(),
        pages.pages_fetched
    );
    Ok(pages.items)
}

fn nested_block_id(block: &BlockRecord) -> Result<BlockId, AppError> {
    let id = block.id.as_deref().ok_or_else(|| {
        AppError::MalformedResponse("Block reports children but has no id".to_string())
    })?;
    Ok(BlockId::parse(id)?)
}
