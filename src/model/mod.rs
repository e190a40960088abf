//! The blog's domain model: normalized posts, tag counts and block trees.

mod block;
mod post;

pub use block::{BlockNode, MarkdownBlock};
pub use post::{Post, PostDetail, SortOrder, TagFilterItem};
