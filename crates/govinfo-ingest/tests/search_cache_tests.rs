//! Cached search against a scripted API and an in-memory store

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::ScriptedApi;
use govinfo_ingest::search_cache::{cache_key, normalize_query};
use govinfo_ingest::{CacheConfig, CachedSearch, IngestError};
use govinfo_store::Store;

fn climate_api() -> ScriptedApi {
    ScriptedApi::new().search_results(2, &["BILLS-118hr1ih", "BILLS-118s5ih"])
}

#[tokio::test]
async fn test_fresh_entry_is_served_without_network() {
    let api = climate_api();
    let store = Store::in_memory().await.unwrap();
    let cache = CachedSearch::new(&api, &store, Duration::hours(24));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    let first = cache.search_at("climate change", 10, now).await.unwrap();
    assert!(!first.from_cache);
    assert_eq!(first.results.count, 2);
    assert_eq!(api.calls_to("search"), 1);

    let second = cache
        .search_at("climate change", 10, now + Duration::hours(23))
        .await
        .unwrap();
    assert!(second.from_cache);
    assert_eq!(second.results, first.results);
    assert_eq!(api.calls_to("search"), 1);
}

#[tokio::test]
async fn test_whitespace_variants_share_an_entry() {
    let api = climate_api();
    let store = Store::in_memory().await.unwrap();
    let cache = CachedSearch::new(&api, &store, Duration::hours(24));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    cache.search_at("climate change", 10, now).await.unwrap();
    let hit = cache.search_at("  climate \t change ", 10, now).await.unwrap();

    assert!(hit.from_cache);
    assert_eq!(api.calls(), vec!["search:climate change"]);
}

#[tokio::test]
async fn test_page_size_is_part_of_the_key() {
    let api = climate_api();
    let store = Store::in_memory().await.unwrap();
    let cache = CachedSearch::new(&api, &store, Duration::hours(24));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    cache.search_at("climate change", 10, now).await.unwrap();
    let other = cache.search_at("climate change", 20, now).await.unwrap();

    assert!(!other.from_cache);
    assert_eq!(api.calls_to("search"), 2);
}

#[tokio::test]
async fn test_expired_entry_is_refetched_and_overwritten() {
    let api = climate_api();
    let store = Store::in_memory().await.unwrap();
    let cache = CachedSearch::new(&api, &store, Duration::hours(24));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let later = now + Duration::hours(25);

    cache.search_at("budget", 10, now).await.unwrap();
    let refreshed = cache.search_at("budget", 10, later).await.unwrap();

    assert!(!refreshed.from_cache);
    assert_eq!(api.calls_to("search"), 2);

    let entry = store
        .search_cache_entry(&cache_key(&normalize_query("budget"), 10))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.query_text, "budget");
    assert_eq!(entry.result_count, 2);
    assert_eq!(entry.created_at, later);
    assert_eq!(entry.expires_at, later + Duration::hours(24));
}

#[tokio::test]
async fn test_entry_expires_exactly_at_ttl() {
    let api = climate_api();
    let store = Store::in_memory().await.unwrap();
    let cache = CachedSearch::new(&api, &store, Duration::hours(1));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    cache.search_at("budget", 10, now).await.unwrap();
    let at_expiry = cache
        .search_at("budget", 10, now + Duration::hours(1))
        .await
        .unwrap();

    assert!(!at_expiry.from_cache);
}

#[tokio::test]
async fn test_api_failure_on_miss_stores_nothing() {
    let api = ScriptedApi::new();
    let store = Store::in_memory().await.unwrap();
    let cache = CachedSearch::with_config(&api, &store, &CacheConfig::default());
    assert_eq!(cache.ttl(), Duration::hours(24));

    let err = cache.search("budget", 10).await.unwrap_err();
    match err {
        IngestError::Client(e) => assert!(e.is_not_found()),
        other => panic!("expected client error, got {:?}", other),
    }

    assert!(store
        .search_cache_entry(&cache_key("budget", 10))
        .await
        .unwrap()
        .is_none());
}
