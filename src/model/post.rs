use serde::Serialize;

/// A published blog post, normalized from one row of the posts database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Notion page id, stable across queries.
    pub id: String,
    /// Never empty; a placeholder stands in for untitled pages.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// `None` rather than an empty list when the post has no tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
    /// Public routing key; the page id when the Slug property is blank.
    pub slug: String,
}

impl Post {
    /// The string posts are ordered by: date, then modified date, then "".
    pub fn sort_key(&self) -> &str {
        self.date
            .as_deref()
            .or(self.modified_date.as_deref())
            .unwrap_or("")
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// One entry of the tag filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFilterItem {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// A post's metadata together with its body as markdown lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub metadata: Post,
    pub content: Vec<String>,
}

/// Order of the post list, as chosen by the blog's sort selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Newest first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
}
