use crate::api::responses::BlockRecord;

/// A Notion block with its children attached.
///
/// `children` is `Some` exactly when the block reported `has_children`.
#[derive(Debug, Clone)]
pub struct BlockNode {
    pub block: BlockRecord,
    pub children: Option<Vec<BlockNode>>,
}

impl BlockNode {
    pub fn children(&self) -> &[BlockNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// One markdown-equivalent line with the lines nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkdownBlock {
    pub text: String,
    pub children: Vec<MarkdownBlock>,
}

impl MarkdownBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MarkdownBlock>) -> Self {
        self.children = children;
        self
    }
}
