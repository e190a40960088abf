// src/config.rs
use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, NOTION_API_BASE_URL};
use crate::error::AppError;
use crate::model::SortOrder;
use crate::types::{ApiKey, NotionId, ValidatedUrl};
use clap::{Parser, Subcommand};
use std::time::Duration;

pub const ENV_API_KEY: &str = "NOTION_API_KEY";
pub const ENV_DATABASE_ID: &str = "NOTION_DATABASE_ID";
pub const ENV_API_BASE_URL: &str = "NOTION_API_BASE_URL";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Read a Notion-backed blog from the terminal", long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: BlogCommand,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Timeout for each Notion API request, in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BlogCommand {
    /// List published posts, newest first
    Posts {
        /// Only posts carrying this tag ("전체" lists everything)
        #[arg(short, long)]
        tag: Option<String>,

        /// Order of the list
        #[arg(short, long, value_enum, default_value_t = SortOrder::Latest)]
        sort: SortOrder,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List tags with the number of published posts using each
    Tags {
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show one published post rendered as markdown
    Post {
        /// The post's slug
        slug: String,

        /// Print JSON (metadata and content lines) instead of markdown
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Resolved connection settings, validated and ready to build a client.
#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub api_key: ApiKey,
    pub database_id: NotionId,
    pub api_base_url: ValidatedUrl,
    pub request_timeout: Duration,
}

impl BlogConfig {
    /// Resolves configuration from CLI flags and the process environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        Self::from_values(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_DATABASE_ID).ok(),
            std::env::var(ENV_API_BASE_URL).ok(),
            cli.timeout_secs,
        )
    }

    /// Builds a configuration from raw values; blank strings count as unset.
    pub fn from_values(
        api_key: Option<String>,
        database_id: Option<String>,
        api_base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, AppError> {
        let api_key = ApiKey::new(required(api_key, ENV_API_KEY)?)?;
        let database_id = NotionId::parse(&required(database_id, ENV_DATABASE_ID)?)?;

        let base_url = api_base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| NOTION_API_BASE_URL.to_string());
        let api_base_url = ValidatedUrl::parse(base_url.trim())?;

        if timeout_secs == 0 {
            return Err(AppError::MissingConfiguration(
                "--timeout-secs must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            database_id,
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", name))
        })
}
