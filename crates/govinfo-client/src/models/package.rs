//! Package summary and its nested link/reference blocks

use super::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Download links for package or granule content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLinks {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub txt_link: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub xml_link: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pdf_link: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub mods_link: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub premis_link: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub zip_link: Field<String>,
}

/// Related documents block. Collections add their own link keys, kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedLinks {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub bill_status_link: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Alternative identifiers (ILS ids, stock numbers)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OtherIdentifier {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub migrated_doc_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub parent_ils_system_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub parent_ils_title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub child_ils_system_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub child_ils_title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub stock_number: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One cited unit inside a [`PackageReference`] (a USC title, a statute page, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceContent {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub label: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sections: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pages: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub congress: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub number: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference from a package into another collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageReference {
    pub collection_code: String,
    pub collection_name: String,
    #[serde(default)]
    pub contents: Vec<ReferenceContent>,
}

/// Response of `GET /packages/{id}/summary`
///
/// Collection-specific keys without a dedicated field are retained in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub package_id: String,
    pub title: String,
    pub collection_code: String,
    pub collection_name: String,
    pub details_link: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub category: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub date_issued: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub last_modified: Field<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub download: Field<DownloadLinks>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub related: Field<RelatedLinks>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub branch: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pages: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub government_author1: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub su_doc_class_number: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub bill_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub congress: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub origin_chamber: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub current_chamber: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub session: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub bill_number: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub bill_version: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub is_appropriation: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub is_private: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub publisher: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub other_identifier: Field<OtherIdentifier>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub references: Field<Vec<PackageReference>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
