//! Shared fixtures for ingestion tests
//!
//! - [`ScriptedApi`]: a [`GovInfoApi`] serving canned JSON and counting calls
//! - [`FlakyStore`]: a real in-memory store that fails a chosen package upsert

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use govinfo_client::{
    ClientError, CollectionList, CollectionPackages, Cursor, GovInfoApi, GranuleList,
    GranuleSummary, PackageQuery, PackageSummary, PublishedPackages, PublishedQuery,
    SearchRequest, SearchResults,
};
use govinfo_ingest::RecordStore;
use govinfo_store::{
    NewCollection, NewGranule, NewPackage, NewSearchCacheEntry, SearchCacheEntry, Store,
    StoreError, StoreResult, UpsertAction,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn next_page_link(collection: &str, next: Option<&str>) -> Value {
    match next {
        Some(mark) => Value::String(format!(
            "https://api.govinfo.gov/collections/{collection}/2024-01-01T00:00:00Z?offsetMark={mark}&pageSize=100"
        )),
        None => Value::Null,
    }
}

fn not_found<T>(endpoint: String) -> govinfo_client::Result<T> {
    Err(ClientError::NotFound { endpoint })
}

fn decode<T: DeserializeOwned>(value: &Value) -> T {
    serde_json::from_value(value.clone()).expect("fixture matches model")
}

/// Canned responses keyed by cursor or identifier
#[derive(Default)]
pub struct ScriptedApi {
    collections: Vec<Value>,
    package_pages: HashMap<String, Value>,
    granule_pages: HashMap<String, Value>,
    summaries: HashMap<String, Value>,
    granule_summaries: HashMap<String, Value>,
    search: Option<Value>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, code: &str, name: &str, package_count: i64) -> Self {
        self.collections.push(json!({
            "collectionCode": code,
            "collectionName": name,
            "packageCount": package_count,
        }));
        self
    }

    /// One page of BILLS packages served at `cursor` (`*` for the first page)
    pub fn package_page(mut self, cursor: &str, packages: &[(&str, &str)], next: Option<&str>) -> Self {
        let packages: Vec<Value> = packages
            .iter()
            .map(|(id, last_modified)| {
                json!({
                    "packageId": id,
                    "lastModified": last_modified,
                    "packageLink": format!("https://api.govinfo.gov/packages/{id}/summary"),
                    "docClass": "hr",
                    "title": format!("Listing title for {id}"),
                    "congress": "118",
                    "dateIssued": "2024-01-02",
                })
            })
            .collect();

        self.package_pages.insert(
            cursor.to_string(),
            json!({
                "count": packages.len(),
                "nextPage": next_page_link("BILLS", next),
                "previousPage": null,
                "packages": packages,
            }),
        );
        self
    }

    pub fn package_summary(mut self, id: &str, title: &str, last_modified: &str) -> Self {
        self.summaries.insert(
            id.to_string(),
            json!({
                "packageId": id,
                "title": title,
                "collectionCode": "BILLS",
                "collectionName": "Congressional Bills",
                "detailsLink": format!("https://www.govinfo.gov/app/details/{id}"),
                "category": "Bills and Statutes",
                "dateIssued": "2024-01-02",
                "lastModified": last_modified,
                "congress": "118",
                "session": "2",
                "billType": "hr",
                "download": { "txtLink": format!("https://api.govinfo.gov/packages/{id}/htm") },
            }),
        );
        self
    }

    pub fn granule_page(
        mut self,
        cursor: &str,
        granules: &[&str],
        next: Option<&str>,
    ) -> Self {
        let granules: Vec<Value> = granules
            .iter()
            .map(|id| {
                json!({
                    "granuleId": id,
                    "title": format!("Granule {id}"),
                    "granuleLink": format!("https://api.govinfo.gov/packages/CREC-2024-01-03/granules/{id}/summary"),
                    "granuleClass": "HOUSE",
                })
            })
            .collect();

        self.granule_pages.insert(
            cursor.to_string(),
            json!({
                "count": granules.len(),
                "nextPage": next_page_link("CREC", next),
                "granules": granules,
            }),
        );
        self
    }

    pub fn granule_summary(mut self, package_id: &str, granule_id: &str, last_modified: &str) -> Self {
        self.granule_summaries.insert(
            granule_id.to_string(),
            json!({
                "granuleId": granule_id,
                "packageId": package_id,
                "title": format!("Summary of {granule_id}"),
                "granuleClass": "HOUSE",
                "collectionCode": "CREC",
                "lastModified": last_modified,
            }),
        );
        self
    }

    pub fn search_results(mut self, count: i64, package_ids: &[&str]) -> Self {
        let results: Vec<Value> = package_ids
            .iter()
            .map(|id| json!({ "packageId": id, "title": format!("Result {id}"), "collectionCode": "BILLS" }))
            .collect();
        self.search = Some(json!({ "count": count, "offsetMark": null, "results": results }));
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose name starts with `method`
    pub fn calls_to(&self, method: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(':').next() == Some(method))
            .count()
    }
}

#[async_trait]
impl GovInfoApi for ScriptedApi {
    async fn list_collections(&self) -> govinfo_client::Result<CollectionList> {
        self.record("list_collections".into());
        Ok(decode(&json!({ "collections": self.collections })))
    }

    async fn collection_packages(
        &self,
        query: &PackageQuery,
        cursor: &Cursor,
    ) -> govinfo_client::Result<CollectionPackages> {
        self.record(format!("collection_packages:{}", cursor.as_str()));
        match self.package_pages.get(cursor.as_str()) {
            Some(page) => Ok(decode(page)),
            None => not_found(format!("/collections/{}", query.collection_code)),
        }
    }

    async fn published_packages(
        &self,
        _query: &PublishedQuery,
        cursor: &Cursor,
    ) -> govinfo_client::Result<PublishedPackages> {
        self.record(format!("published_packages:{}", cursor.as_str()));
        not_found("/published".into())
    }

    async fn package_summary(&self, package_id: &str) -> govinfo_client::Result<PackageSummary> {
        self.record(format!("package_summary:{package_id}"));
        match self.summaries.get(package_id) {
            Some(summary) => Ok(decode(summary)),
            None => not_found(format!("/packages/{package_id}/summary")),
        }
    }

    async fn package_granules(
        &self,
        package_id: &str,
        cursor: &Cursor,
        page_size: u32,
    ) -> govinfo_client::Result<GranuleList> {
        self.record(format!("package_granules:{}:{page_size}", cursor.as_str()));
        match self.granule_pages.get(cursor.as_str()) {
            Some(page) => Ok(decode(page)),
            None => not_found(format!("/packages/{package_id}/granules")),
        }
    }

    async fn granule_summary(
        &self,
        package_id: &str,
        granule_id: &str,
    ) -> govinfo_client::Result<GranuleSummary> {
        self.record(format!("granule_summary:{granule_id}"));
        match self.granule_summaries.get(granule_id) {
            Some(summary) => Ok(decode(summary)),
            None => not_found(format!("/packages/{package_id}/granules/{granule_id}/summary")),
        }
    }

    async fn search(&self, request: &SearchRequest) -> govinfo_client::Result<SearchResults> {
        self.record(format!("search:{}", request.query));
        match &self.search {
            Some(results) => Ok(decode(results)),
            None => not_found("/search".into()),
        }
    }
}

/// In-memory store whose `fail_on`-th package upsert (1-based) fails
pub struct FlakyStore {
    pub inner: Store,
    fail_on: usize,
    package_upserts: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: Store, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            package_upserts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn collection_exists(&self, collection_code: &str) -> StoreResult<bool> {
        self.inner.collection_exists(collection_code).await
    }

    async fn package_exists(&self, package_id: &str) -> StoreResult<bool> {
        self.inner.package_exists(package_id).await
    }

    async fn upsert_collection(&self, collection: &NewCollection) -> StoreResult<UpsertAction> {
        self.inner.upsert_collection(collection).await
    }

    async fn upsert_package(&self, package: &NewPackage) -> StoreResult<UpsertAction> {
        let attempt = self.package_upserts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(StoreError::not_found("package", &package.package_id));
        }
        self.inner.upsert_package(package).await
    }

    async fn upsert_granule(&self, granule: &NewGranule) -> StoreResult<UpsertAction> {
        self.inner.upsert_granule(granule).await
    }

    async fn package_last_modified(&self, package_id: &str) -> StoreResult<Option<DateTime<Utc>>> {
        self.inner.package_last_modified(package_id).await
    }

    async fn granule_last_modified(&self, granule_id: &str) -> StoreResult<Option<DateTime<Utc>>> {
        self.inner.granule_last_modified(granule_id).await
    }

    async fn search_cache_entry(&self, query_hash: &str) -> StoreResult<Option<SearchCacheEntry>> {
        self.inner.search_cache_entry(query_hash).await
    }

    async fn put_search_cache(&self, entry: &NewSearchCacheEntry) -> StoreResult<()> {
        self.inner.put_search_cache(entry).await
    }
}

pub async fn store_with_collections(codes: &[(&str, &str)]) -> Store {
    let store = Store::in_memory().await.unwrap();
    for (code, name) in codes {
        store
            .upsert_collection(&NewCollection::new(*code, *name))
            .await
            .unwrap();
    }
    store
}
