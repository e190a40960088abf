// src/api/query.rs
//! Request shapes for querying a Notion data source.

use crate::constants::{ALL_TAG_NAME, PROPERTY_SLUG, PROPERTY_STATUS, PROPERTY_TAGS, STATUS_PUBLISHED};
use serde::Serialize;

/// Body of `POST /data_sources/{id}/query`, minus the pagination fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
}

impl DataSourceQuery {
    /// Published posts, newest-created first, optionally narrowed to one tag.
    ///
    /// A blank tag or the all-tag name counts as "no tag".
    pub fn published_posts(tag: Option<&str>) -> Self {
        let mut conditions = vec![PropertyCondition::status_published()];
        if let Some(tag) = tag.filter(|tag| !tag.trim().is_empty() && *tag != ALL_TAG_NAME) {
            conditions.push(PropertyCondition {
                property: PROPERTY_TAGS.to_string(),
                predicate: Predicate::MultiSelect(TextMatch::Contains(tag.to_string())),
            });
        }

        Self {
            filter: Some(Filter::all_of(conditions)),
            sorts: vec![Sort::created_time_descending()],
        }
    }

    /// The published post with the given slug.
    pub fn post_by_slug(slug: &str) -> Self {
        let conditions = vec![
            PropertyCondition {
                property: PROPERTY_SLUG.to_string(),
                predicate: Predicate::RichText(TextMatch::Equals(slug.to_string())),
            },
            PropertyCondition::status_published(),
        ];

        Self {
            filter: Some(Filter::all_of(conditions)),
            sorts: Vec::new(),
        }
    }
}

/// A single condition, or an `and` composite of several.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Filter {
    Condition(PropertyCondition),
    And { and: Vec<PropertyCondition> },
}

impl Filter {
    /// Combines conditions with AND; a lone condition is sent unwrapped.
    pub fn all_of(mut conditions: Vec<PropertyCondition>) -> Self {
        if conditions.len() == 1 {
            if let Some(condition) = conditions.pop() {
                return Filter::Condition(condition);
            }
        }
        Filter::And { and: conditions }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyCondition {
    pub property: String,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl PropertyCondition {
    fn status_published() -> Self {
        Self {
            property: PROPERTY_STATUS.to_string(),
            predicate: Predicate::Select(TextMatch::Equals(STATUS_PUBLISHED.to_string())),
        }
    }
}

/// Property type tag plus operator, e.g. `{"select": {"equals": "Published"}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Select(TextMatch),
    MultiSelect(TextMatch),
    RichText(TextMatch),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    Equals(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub timestamp: &'static str,
    pub direction: &'static str,
}

impl Sort {
    pub fn created_time_descending() -> Self {
        Self {
            timestamp: "created_time",
            direction: "descending",
        }
    }
}
