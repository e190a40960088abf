// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication, the API
//! version header and request timeouts; parsing lives in [`super::parser`].

use super::parser::parse_api_response;
use super::query::DataSourceQuery;
use super::responses::{BlockRecord, DatabaseRecord, PageRecord, PaginatedResponse};
use crate::config::BlogConfig;
use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_VERSION,
};
use crate::error::AppError;
use crate::types::{ApiKey, BlockId, DataSourceId, NotionId, ValidatedUrl};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a client for the public Notion API with the default timeout.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let base_url = ValidatedUrl::parse(NOTION_API_BASE_URL)?;
        Self::with_options(
            api_key,
            &base_url,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Creates a client from resolved configuration.
    pub fn from_config(config: &BlogConfig) -> Result<Self, AppError> {
        Self::with_options(&config.api_key, &config.api_base_url, config.request_timeout)
    }

    /// Creates a client against an explicit base URL (e.g. a mock server).
    pub fn with_options(
        api_key: &ApiKey,
        base_url: &ValidatedUrl,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_base().to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint with query parameters.
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {} {:?}", url, query);

        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "   Query body: {}",
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
            );
        }

        Ok(self.client.post(url).json(body).send().await?)
    }
}

/// Query body plus the pagination fields Notion expects alongside it.
#[derive(Serialize)]
struct PagedQuery<'a> {
    #[serde(flatten)]
    query: &'a DataSourceQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
    page_size: usize,
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseRecord, AppError> {
        let endpoint = format!("databases/{}", id.to_hyphenated());
        let response = self.get(&endpoint, &[]).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn query_data_source(
        &self,
        data_source: &DataSourceId,
        query: &DataSourceQuery,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<PageRecord>, AppError> {
        let endpoint = format!("data_sources/{}/query", data_source.to_dashed());
        let body = PagedQuery {
            query,
            start_cursor: cursor,
            page_size: NOTION_API_PAGE_SIZE,
        };
        let response = self.post(&endpoint, &body).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn list_block_children(
        &self,
        block: &BlockId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<BlockRecord>, AppError> {
        let endpoint = format!("blocks/{}/children", block.to_dashed());
        let mut query = vec![("page_size", NOTION_API_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }
        let response = self.get(&endpoint, &query).await?;
        parse_api_response(extract_response_text(response).await?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
