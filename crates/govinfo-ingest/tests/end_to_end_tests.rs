//! HTTP client, ingestion and export wired together
//!
//! A mock GovInfo server feeds the real client; rows land in a file-backed
//! SQLite database and are exported back out as CSV.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{TimeZone, Utc};
use govinfo_client::{ClientConfig, GovInfoClient, PackageQuery, WalkOutcome};
use govinfo_ingest::{IngestOptions, Ingestion, Table};
use govinfo_store::{NewCollection, PackageFilter, Store, StoreConfig};
use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn package(id: &str, title: &str) -> serde_json::Value {
    json!({
        "packageId": id,
        "lastModified": "2024-01-02T03:04:05Z",
        "packageLink": format!("https://api.govinfo.gov/packages/{id}/summary"),
        "docClass": "hr",
        "title": title,
        "congress": "118",
        "dateIssued": "2024-01-02"
    })
}

#[tokio::test]
async fn test_ingest_from_http_and_export_csv() {
    let mock_server = MockServer::start().await;
    let page_two_link = format!(
        "{}/collections/BILLS/2024-01-01T00:00:00Z?offsetMark=abc&pageSize=100",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/collections/BILLS/2024-01-01T00:00:00Z"))
        .and(query_param("offsetMark", "*"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "nextPage": page_two_link,
            "packages": [package("BILLS-118hr1ih", "Lower Energy Costs Act")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/BILLS/2024-01-01T00:00:00Z"))
        .and(query_param("offsetMark", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "nextPage": null,
            "packages": [package("BILLS-118hr2ih", "Secure the Border Act, 2023")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        GovInfoClient::new(ClientConfig::new("test-key").with_base_url(mock_server.uri())).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("govinfo.db");
    let store = Store::connect(&StoreConfig::new(format!("sqlite://{}", db_path.display())))
        .await
        .unwrap();
    store
        .upsert_collection(&NewCollection::new("BILLS", "Congressional Bills"))
        .await
        .unwrap();

    let query = PackageQuery::new("BILLS", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let report = Ingestion::new(&client, &store)
        .ingest_collection_packages(&query, &IngestOptions::default())
        .await
        .unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.pages, 2);
    assert_eq!(report.outcome, WalkOutcome::Completed);

    let rows = store
        .list_packages(&PackageFilter::default().collection("BILLS"))
        .await
        .unwrap();
    let table = Table::from_records(&rows);
    assert_eq!(table.len(), 2);

    let csv = table.to_csv_string().unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("packageId,collectionCode,title,congress,dateIssued,lastModified,updatedAt")
    );
    assert!(csv.contains("BILLS-118hr1ih,BILLS,Lower Energy Costs Act,118,2024-01-02,2024-01-02T03:04:05+00:00,"));
    assert!(csv.contains("\"Secure the Border Act, 2023\""));

    store.close().await;
}
