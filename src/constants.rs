// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! in order tells you how the blog talks to Notion and what it expects to
//! find in the posts database.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking block children and query results.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Maximum block nesting depth followed by the block fetcher.
///
/// Real documents rarely nest more than a handful of levels; anything
/// deeper than this is treated as a runaway fetch.
pub const NOTION_MAX_FETCH_DEPTH: usize = 50;

/// Maximum block-children requests in flight for one tree fetch.
///
/// Notion rate-limits integrations to about three requests per second on
/// average with short bursts allowed; wide documents would otherwise open
/// one request per sibling at once.
pub const NOTION_MAX_CONCURRENT_FETCHES: usize = 8;

/// API version that exposes data sources behind databases.
pub const NOTION_VERSION: &str = "2025-09-03";

/// Default address of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Seconds before a single HTTP request to Notion is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Posts database schema
// ---------------------------------------------------------------------------

pub const PROPERTY_TITLE: &str = "Title";
pub const PROPERTY_DESCRIPTION: &str = "Description";
pub const PROPERTY_TAGS: &str = "Tags";
pub const PROPERTY_AUTHOR: &str = "Author";
pub const PROPERTY_DATE: &str = "Date";
pub const PROPERTY_MODIFIED_DATE: &str = "Modified Date";
pub const PROPERTY_SLUG: &str = "Slug";
pub const PROPERTY_STATUS: &str = "Status";

/// Status value that makes a post visible on the blog.
pub const STATUS_PUBLISHED: &str = "Published";

/// Title shown when a post has none ("untitled").
pub const PLACEHOLDER_TITLE: &str = "제목 없음";

/// Identifier of the synthetic tag that means "no filter".
pub const ALL_TAG_ID: &str = "all";

/// Display name of the synthetic all-tag ("all"). Also accepted as a tag
/// filter meaning "no filter".
pub const ALL_TAG_NAME: &str = "전체";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
