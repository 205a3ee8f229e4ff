//! Collection listing and collection-scoped package listing

use super::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of `GET /collections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub collection_code: String,
    pub collection_name: String,
    pub package_count: i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub granule_count: Field<i64>,
}

/// Response of `GET /collections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionList {
    pub collections: Vec<CollectionSummary>,
}

/// Brief package entry as returned by the collection and published listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub package_id: String,
    pub last_modified: DateTime<Utc>,
    pub package_link: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub doc_class: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub congress: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub date_issued: Field<String>,
}

/// Response of `GET /collections/{code}/{start}[/{end}]`
///
/// `count` is the server's estimate of the total and is not used to decide
/// when paging stops; only `next_page` is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPackages {
    pub count: i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub message: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub next_page: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub previous_page: Field<String>,
    #[serde(default)]
    pub packages: Vec<PackageInfo>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_list_parses() {
        let list: CollectionList = serde_json::from_value(json!({
            "collections": [
                {
                    "collectionCode": "BILLS",
                    "collectionName": "Congressional Bills",
                    "packageCount": 197925,
                    "granuleCount": null
                },
                {
                    "collectionCode": "CREC",
                    "collectionName": "Congressional Record",
                    "packageCount": 5000,
                    "granuleCount": 120000
                }
            ]
        }))
        .unwrap();

        assert_eq!(list.collections.len(), 2);
        assert!(list.collections[0].granule_count.is_null());
        assert_eq!(list.collections[1].granule_count.value(), Some(&120000));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<CollectionSummary, _> = serde_json::from_value(json!({
            "collectionCode": "BILLS",
            "packageCount": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_collection_packages_without_packages_key() {
        let page: CollectionPackages = serde_json::from_value(json!({
            "count": 0,
            "message": "No results"
        }))
        .unwrap();
        assert!(page.packages.is_empty());
        assert!(page.next_page.is_absent());
    }
}
