// src/formatting/mod.rs
//! Renders fetched Notion block trees into markdown lines.
//!
//! Conversion happens in two pure passes: [`convert_block_tree`] turns each
//! block into a one-line [`MarkdownBlock`](crate::model::MarkdownBlock),
//! then [`blocks_to_markdown`] flattens the tree with list indentation.

mod block_markdown;
mod projector;
mod rich_text;

pub use block_markdown::convert_block_tree;
pub use projector::blocks_to_markdown;
pub use rich_text::{rich_text_to_markdown, rich_text_to_plain};
