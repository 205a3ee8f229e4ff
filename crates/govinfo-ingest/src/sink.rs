//! Where ingested records are written
//!
//! The pipeline and the search cache only need these operations, so they are
//! generic over [`RecordStore`] rather than tied to [`Store`]. Tests wrap a
//! real store to inject failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use govinfo_store::{
    NewCollection, NewGranule, NewPackage, NewSearchCacheEntry, SearchCacheEntry, Store,
    StoreResult, UpsertAction,
};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn collection_exists(&self, collection_code: &str) -> StoreResult<bool>;

    async fn package_exists(&self, package_id: &str) -> StoreResult<bool>;

    async fn upsert_collection(&self, collection: &NewCollection) -> StoreResult<UpsertAction>;

    async fn upsert_package(&self, package: &NewPackage) -> StoreResult<UpsertAction>;

    async fn upsert_granule(&self, granule: &NewGranule) -> StoreResult<UpsertAction>;

    async fn package_last_modified(&self, package_id: &str) -> StoreResult<Option<DateTime<Utc>>>;

    async fn granule_last_modified(&self, granule_id: &str) -> StoreResult<Option<DateTime<Utc>>>;

    async fn search_cache_entry(&self, query_hash: &str) -> StoreResult<Option<SearchCacheEntry>>;

    async fn put_search_cache(&self, entry: &NewSearchCacheEntry) -> StoreResult<()>;
}

#[async_trait]
impl RecordStore for Store {
    async fn collection_exists(&self, collection_code: &str) -> StoreResult<bool> {
        Store::collection_exists(self, collection_code).await
    }

    async fn package_exists(&self, package_id: &str) -> StoreResult<bool> {
        Store::package_exists(self, package_id).await
    }

    async fn upsert_collection(&self, collection: &NewCollection) -> StoreResult<UpsertAction> {
        Store::upsert_collection(self, collection).await
    }

    async fn upsert_package(&self, package: &NewPackage) -> StoreResult<UpsertAction> {
        Store::upsert_package(self, package).await
    }

    async fn upsert_granule(&self, granule: &NewGranule) -> StoreResult<UpsertAction> {
        Store::upsert_granule(self, granule).await
    }

    async fn package_last_modified(&self, package_id: &str) -> StoreResult<Option<DateTime<Utc>>> {
        Store::package_last_modified(self, package_id).await
    }

    async fn granule_last_modified(&self, granule_id: &str) -> StoreResult<Option<DateTime<Utc>>> {
        Store::granule_last_modified(self, granule_id).await
    }

    async fn search_cache_entry(&self, query_hash: &str) -> StoreResult<Option<SearchCacheEntry>> {
        Store::search_cache_entry(self, query_hash).await
    }

    async fn put_search_cache(&self, entry: &NewSearchCacheEntry) -> StoreResult<()> {
        Store::put_search_cache(self, entry).await
    }
}
