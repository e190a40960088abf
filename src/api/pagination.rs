// src/api/pagination.rs
//! Cursor pagination over Notion list endpoints.

use super::responses::PaginatedResponse;
use crate::error::AppError;

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

/// Fetches every page by following continuation cursors until the service
/// stops returning one.
///
/// Each request depends on the previous response's cursor, so pages are
/// fetched strictly one after another.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(cursor.take()).await?;
        pages_fetched += 1;
        all_items.extend(response.results);

        match response.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    log::debug!(
        "Collected {} items across {} page(s)",
        all_items.len(),
        pages_fetched
    );

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}
