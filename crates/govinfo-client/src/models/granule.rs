//! Granule listing and summary

use super::{DownloadLinks, Field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Brief granule entry of `GET /packages/{id}/granules`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleInfo {
    pub granule_id: String,
    pub title: String,
    pub granule_link: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub granule_class: Field<String>,
}

/// Response of `GET /packages/{id}/granules`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleList {
    pub count: i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub message: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub next_page: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub previous_page: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub offset_mark: Field<String>,
    #[serde(default)]
    pub granules: Vec<GranuleInfo>,
}

/// Response of `GET /packages/{id}/granules/{granuleId}/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleSummary {
    pub granule_id: String,
    pub package_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub granule_class: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub collection_code: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub collection_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub category: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub date_issued: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub details_link: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub download: Field<DownloadLinks>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub last_modified: Field<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub branch: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pages: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub congress: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub session: Field<String>,
    // Member directory (CDIR) fields
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub member_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub authority_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub birth_year: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub state: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub district: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub party: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub biographical_note: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub official_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub social_media: Field<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_granule_list_parses() {
        let list: GranuleList = serde_json::from_value(json!({
            "count": 2,
            "offsetMark": "*",
            "nextPage": null,
            "granules": [
                {
                    "granuleId": "CREC-2024-01-03-pt1-PgH1",
                    "title": "House Section",
                    "granuleLink": "https://api.govinfo.gov/packages/CREC-2024-01-03/granules/CREC-2024-01-03-pt1-PgH1/summary",
                    "granuleClass": "HOUSE"
                },
                {
                    "granuleId": "CREC-2024-01-03-pt1-PgS1",
                    "title": "Senate Section",
                    "granuleLink": "https://api.govinfo.gov/packages/CREC-2024-01-03/granules/CREC-2024-01-03-pt1-PgS1/summary"
                }
            ]
        }))
        .unwrap();

        assert_eq!(list.granules.len(), 2);
        assert!(list.next_page.is_null());
        assert!(list.granules[1].granule_class.is_absent());
    }

    #[test]
    fn test_granule_summary_member_fields() {
        let summary: GranuleSummary = serde_json::from_value(json!({
            "granuleId": "CDIR-2022-10-26-WA-H-1",
            "packageId": "CDIR-2022-10-26",
            "title": "Washington, First District",
            "granuleClass": "HOUSE",
            "memberName": "DelBene, Suzan K.",
            "party": "D",
            "socialMedia": { "twitter": "RepDelBene" },
            "lastModified": "2022-10-27T12:00:00Z",
            "bioguideId": "D000617"
        }))
        .unwrap();

        assert_eq!(summary.party.as_deref(), Some("D"));
        assert_eq!(
            summary.social_media.value().and_then(|m| m.get("twitter")),
            Some(&"RepDelBene".to_string())
        );
        assert_eq!(summary.extra["bioguideId"], "D000617");
    }
}
