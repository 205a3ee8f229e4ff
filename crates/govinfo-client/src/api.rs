//! Source-of-records abstraction
//!
//! [`GovInfoClient`](crate::GovInfoClient) is the production implementation.
//! The ingestion pipeline and the search cache are written against this
//! trait so tests can drive them with scripted responses.

use crate::error::Result;
use crate::models::{
    CollectionList, CollectionPackages, GranuleList, GranuleSummary, PackageSummary,
    PublishedPackages, SearchRequest, SearchResults,
};
use crate::pagination::Cursor;
use crate::query::{PackageQuery, PublishedQuery};
use async_trait::async_trait;

#[async_trait]
pub trait GovInfoApi: Send + Sync {
    async fn list_collections(&self) -> Result<CollectionList>;

    async fn collection_packages(
        &self,
        query: &PackageQuery,
        cursor: &Cursor,
    ) -> Result<CollectionPackages>;

    async fn published_packages(
        &self,
        query: &PublishedQuery,
        cursor: &Cursor,
    ) -> Result<PublishedPackages>;

    async fn package_summary(&self, package_id: &str) -> Result<PackageSummary>;

    async fn package_granules(
        &self,
        package_id: &str,
        cursor: &Cursor,
        page_size: u32,
    ) -> Result<GranuleList>;

    async fn granule_summary(&self, package_id: &str, granule_id: &str)
        -> Result<GranuleSummary>;

    async fn search(&self, request: &SearchRequest) -> Result<SearchResults>;
}
