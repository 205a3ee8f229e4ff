//! HTTP client for the GovInfo API
//!
//! Every request carries the `api_key` query parameter. Responses are mapped
//! to [`ClientError`] by status; nothing is retried.

use crate::api::GovInfoApi;
use crate::config::ClientConfig;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{
    CollectionList, CollectionPackages, ContentFormat, GranuleList, GranuleSummary,
    PackageSummary, PublishedPackages, RelatedDocuments, SearchRequest, SearchResults,
};
use crate::pagination::Cursor;
use crate::query::{PackageQuery, PublishedQuery};
use async_trait::async_trait;
use govinfo_common::dates::format_iso_date;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Longest error body kept in [`ClientError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 512;

const PUBLISHED_DATE_FORMAT: &str = "%Y-%m-%d";

/// GovInfo API client
pub struct GovInfoClient {
    client: Client,
    config: ClientConfig,
}

impl GovInfoClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::from_reqwest("client builder", e))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint<'u>(&self, url: &'u str) -> &'u str {
        url.strip_prefix(self.config.base_url.as_str()).unwrap_or(url)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response> {
        debug!(endpoint, "GovInfo request");

        let response = request
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(endpoint, e))?;

        check_status(response, endpoint).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let endpoint = self.endpoint(url);
        let response = self.send(self.client.get(url).query(params), endpoint).await?;
        decode(response, endpoint).await
    }

    // ========================================================================
    // Collections
    // ========================================================================

    pub async fn list_collections(&self) -> Result<CollectionList> {
        let url = endpoints::collections_url(self.base_url());
        self.get_json(&url, &[]).await
    }

    pub async fn collection_packages(
        &self,
        query: &PackageQuery,
        cursor: &Cursor,
    ) -> Result<CollectionPackages> {
        let start = format_iso_date(query.last_modified_start);
        let end = query.last_modified_end.map(format_iso_date);
        let url = endpoints::collection_packages_url(
            self.base_url(),
            &query.collection_code,
            &start,
            end.as_deref(),
        );

        let params = [
            ("offsetMark", cursor.as_str().to_string()),
            ("pageSize", query.get_page_size().to_string()),
        ];
        self.get_json(&url, &params).await
    }

    // ========================================================================
    // Published
    // ========================================================================

    pub async fn published_packages(
        &self,
        query: &PublishedQuery,
        cursor: &Cursor,
    ) -> Result<PublishedPackages> {
        let start = query
            .date_issued_start
            .format(PUBLISHED_DATE_FORMAT)
            .to_string();
        let end = query
            .date_issued_end
            .map(|d| d.format(PUBLISHED_DATE_FORMAT).to_string());
        let url = endpoints::published_url(self.base_url(), &start, end.as_deref());

        let mut params = vec![
            ("offsetMark", cursor.as_str().to_string()),
            ("pageSize", query.get_page_size().to_string()),
        ];
        if !query.collections.is_empty() {
            params.push(("collection", query.collections.join(",")));
        }
        if let Some(doc_class) = &query.doc_class {
            params.push(("docClass", doc_class.clone()));
        }
        if let Some(congress) = &query.congress {
            params.push(("congress", congress.clone()));
        }
        if let Some(since) = query.modified_since {
            params.push(("modifiedSince", format_iso_date(since)));
        }

        self.get_json(&url, &params).await
    }

    // ========================================================================
    // Packages and granules
    // ========================================================================

    pub async fn package_summary(&self, package_id: &str) -> Result<PackageSummary> {
        let url = endpoints::package_summary_url(self.base_url(), package_id);
        self.get_json(&url, &[]).await
    }

    /// Download a package rendition as raw bytes
    pub async fn package_content(
        &self,
        package_id: &str,
        format: ContentFormat,
    ) -> Result<Vec<u8>> {
        let url = endpoints::package_content_url(self.base_url(), package_id, format);
        let endpoint = self.endpoint(&url);
        let response = self.send(self.client.get(&url), endpoint).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(endpoint, e))?;

        Ok(bytes.to_vec())
    }

    pub async fn package_granules(
        &self,
        package_id: &str,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<GranuleList> {
        let url = endpoints::package_granules_url(self.base_url(), package_id);
        let params = [
            ("offsetMark", cursor.as_str().to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.get_json(&url, &params).await
    }

    pub async fn granule_summary(
        &self,
        package_id: &str,
        granule_id: &str,
    ) -> Result<GranuleSummary> {
        let url = endpoints::granule_summary_url(self.base_url(), package_id, granule_id);
        self.get_json(&url, &[]).await
    }

    // ========================================================================
    // Search and related
    // ========================================================================

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        if request.query.trim().is_empty() {
            return Err(ClientError::invalid_request("search query must not be empty"));
        }

        let url = endpoints::search_url(self.base_url());
        let endpoint = self.endpoint(&url);
        let response = self
            .send(self.client.post(&url).json(request), endpoint)
            .await?;
        decode(response, endpoint).await
    }

    pub async fn related(&self, package_id: &str) -> Result<RelatedDocuments> {
        let url = endpoints::related_url(self.base_url(), package_id, None);
        self.get_json(&url, &[]).await
    }

    pub async fn related_by_type(
        &self,
        package_id: &str,
        relationship: &str,
    ) -> Result<RelatedDocuments> {
        let url = endpoints::related_url(self.base_url(), package_id, Some(relationship));
        self.get_json(&url, &[]).await
    }
}

async fn check_status(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!(endpoint, status = status.as_u16(), "GovInfo request failed");

    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound {
            endpoint: endpoint.to_string(),
        }),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());

            Err(ClientError::RateLimited {
                endpoint: endpoint.to_string(),
                retry_after,
            })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            })
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::from_reqwest(endpoint, e))?;

    serde_json::from_slice(&bytes).map_err(|source| ClientError::Validation {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[async_trait]
impl GovInfoApi for GovInfoClient {
    async fn list_collections(&self) -> Result<CollectionList> {
        GovInfoClient::list_collections(self).await
    }

    async fn collection_packages(
        &self,
        query: &PackageQuery,
        cursor: &Cursor,
    ) -> Result<CollectionPackages> {
        GovInfoClient::collection_packages(self, query, cursor).await
    }

    async fn published_packages(
        &self,
        query: &PublishedQuery,
        cursor: &Cursor,
    ) -> Result<PublishedPackages> {
        GovInfoClient::published_packages(self, query, cursor).await
    }

    async fn package_summary(&self, package_id: &str) -> Result<PackageSummary> {
        GovInfoClient::package_summary(self, package_id).await
    }

    async fn package_granules(
        &self,
        package_id: &str,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<GranuleList> {
        GovInfoClient::package_granules(self, package_id, cursor, page_size).await
    }

    async fn granule_summary(
        &self,
        package_id: &str,
        granule_id: &str,
    ) -> Result<GranuleSummary> {
        GovInfoClient::granule_summary(self, package_id, granule_id).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        GovInfoClient::search(self, request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GovInfoClient::new(ClientConfig::new("DEMO_KEY")).unwrap();
        assert_eq!(client.base_url(), "https://api.govinfo.gov");
    }

    #[test]
    fn test_client_rejects_empty_key() {
        assert!(matches!(
            GovInfoClient::new(ClientConfig::new("")),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_label_strips_base() {
        let client = GovInfoClient::new(ClientConfig::new("k")).unwrap();
        assert_eq!(
            client.endpoint("https://api.govinfo.gov/collections"),
            "/collections"
        );
    }
}
