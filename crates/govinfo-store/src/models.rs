//! Row types and the write payloads built from API records
//!
//! `New*` structs carry every mutable column of a row. An upsert writes all
//! of them, so a payload built from a listing entry clears columns that only
//! a summary would fill.

use crate::error::StoreResult;
use chrono::{DateTime, Utc};
use govinfo_client::models::{
    CollectionSummary, Field, GranuleInfo, GranuleSummary, PackageInfo, PackageSummary,
};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;

/// Whether an upsert created a row or overwrote one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Inserted,
    Updated,
}

// ============================================================================
// Write payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NewCollection {
    pub collection_code: String,
    pub collection_name: String,
    pub package_count: i64,
    pub granule_count: Option<i64>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl NewCollection {
    pub fn new(collection_code: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            collection_code: collection_code.into(),
            collection_name: collection_name.into(),
            package_count: 0,
            granule_count: None,
            last_synced_at: None,
        }
    }

    pub fn synced_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_synced_at = Some(at);
        self
    }
}

impl From<&CollectionSummary> for NewCollection {
    fn from(summary: &CollectionSummary) -> Self {
        Self {
            collection_code: summary.collection_code.clone(),
            collection_name: summary.collection_name.clone(),
            package_count: summary.package_count,
            granule_count: summary.granule_count.value().copied(),
            last_synced_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPackage {
    pub package_id: String,
    pub collection_code: String,
    pub title: Option<String>,
    pub collection_name: Option<String>,
    pub category: Option<String>,
    pub date_issued: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub branch: Option<String>,
    pub congress: Option<String>,
    pub session: Option<String>,
    pub download_links: Option<Value>,
    pub related_links: Option<Value>,
    pub references: Option<Value>,
    pub metadata: Option<Value>,
}

impl NewPackage {
    pub fn new(package_id: impl Into<String>, collection_code: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            collection_code: collection_code.into(),
            ..Self::default()
        }
    }

    /// Payload from a collection or published listing entry
    pub fn from_listing(info: &PackageInfo, collection_code: &str) -> Self {
        let mut metadata = Map::new();
        metadata.insert("packageLink".into(), Value::String(info.package_link.clone()));
        put_field(&mut metadata, "docClass", &info.doc_class);

        Self {
            package_id: info.package_id.clone(),
            collection_code: collection_code.to_string(),
            title: info.title.value().cloned(),
            date_issued: info.date_issued.value().cloned(),
            last_modified: Some(info.last_modified),
            congress: info.congress.value().cloned(),
            metadata: Some(Value::Object(metadata)),
            ..Self::default()
        }
    }

    /// Payload from a full package summary
    pub fn from_summary(summary: &PackageSummary) -> StoreResult<Self> {
        let mut metadata = Map::new();
        put_field(&mut metadata, "billType", &summary.bill_type);
        put_field(&mut metadata, "billNumber", &summary.bill_number);
        put_field(&mut metadata, "billVersion", &summary.bill_version);
        put_field(&mut metadata, "publisher", &summary.publisher);
        put_field(&mut metadata, "pages", &summary.pages);
        put_field(&mut metadata, "governmentAuthor1", &summary.government_author1);
        put_field(&mut metadata, "suDocClassNumber", &summary.su_doc_class_number);
        put_field(&mut metadata, "originChamber", &summary.origin_chamber);
        put_field(&mut metadata, "currentChamber", &summary.current_chamber);
        put_field(&mut metadata, "isAppropriation", &summary.is_appropriation);
        put_field(&mut metadata, "isPrivate", &summary.is_private);
        if let Field::Value(other) = &summary.other_identifier {
            metadata.insert("otherIdentifier".into(), serde_json::to_value(other)?);
        }
        metadata.insert("detailsLink".into(), Value::String(summary.details_link.clone()));
        for (key, value) in &summary.extra {
            metadata.insert(key.clone(), value.clone());
        }

        Ok(Self {
            package_id: summary.package_id.clone(),
            collection_code: summary.collection_code.clone(),
            title: Some(summary.title.clone()),
            collection_name: Some(summary.collection_name.clone()),
            category: summary.category.value().cloned(),
            date_issued: summary.date_issued.value().cloned(),
            last_modified: summary.last_modified.value().copied(),
            branch: summary.branch.value().cloned(),
            congress: summary.congress.value().cloned(),
            session: summary.session.value().cloned(),
            download_links: json_field(&summary.download)?,
            related_links: json_field(&summary.related)?,
            references: json_field(&summary.references)?,
            metadata: Some(Value::Object(metadata)),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewGranule {
    pub granule_id: String,
    pub package_id: String,
    pub title: Option<String>,
    pub granule_class: Option<String>,
    pub collection_code: Option<String>,
    pub date_issued: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub download_links: Option<Value>,
    pub metadata: Option<Value>,
}

impl NewGranule {
    pub fn new(granule_id: impl Into<String>, package_id: impl Into<String>) -> Self {
        Self {
            granule_id: granule_id.into(),
            package_id: package_id.into(),
            ..Self::default()
        }
    }

    pub fn from_listing(info: &GranuleInfo, package_id: &str) -> Self {
        let mut metadata = Map::new();
        metadata.insert("granuleLink".into(), Value::String(info.granule_link.clone()));

        Self {
            granule_id: info.granule_id.clone(),
            package_id: package_id.to_string(),
            title: Some(info.title.clone()),
            granule_class: info.granule_class.value().cloned(),
            metadata: Some(Value::Object(metadata)),
            ..Self::default()
        }
    }

    pub fn from_summary(summary: &GranuleSummary) -> StoreResult<Self> {
        let mut metadata = Map::new();
        put_field(&mut metadata, "branch", &summary.branch);
        put_field(&mut metadata, "pages", &summary.pages);
        put_field(&mut metadata, "congress", &summary.congress);
        put_field(&mut metadata, "session", &summary.session);
        put_field(&mut metadata, "memberName", &summary.member_name);
        put_field(&mut metadata, "party", &summary.party);
        put_field(&mut metadata, "state", &summary.state);
        put_field(&mut metadata, "district", &summary.district);
        for (key, value) in &summary.extra {
            metadata.insert(key.clone(), value.clone());
        }

        Ok(Self {
            granule_id: summary.granule_id.clone(),
            package_id: summary.package_id.clone(),
            title: Some(summary.title.clone()),
            granule_class: summary.granule_class.value().cloned(),
            collection_code: summary.collection_code.value().cloned(),
            date_issued: summary.date_issued.value().cloned(),
            last_modified: summary.last_modified.value().copied(),
            download_links: json_field(&summary.download)?,
            metadata: Some(Value::Object(metadata)),
        })
    }
}

/// Present keys are kept, including explicit nulls; absent keys are skipped.
fn put_field(map: &mut Map<String, Value>, key: &str, field: &Field<String>) {
    match field {
        Field::Absent => {}
        Field::Null => {
            map.insert(key.to_string(), Value::Null);
        }
        Field::Value(v) => {
            map.insert(key.to_string(), Value::String(v.clone()));
        }
    }
}

fn json_field<T: Serialize>(field: &Field<T>) -> StoreResult<Option<Value>> {
    match field {
        Field::Value(v) => Ok(Some(serde_json::to_value(v)?)),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSearchCacheEntry {
    pub query_hash: String,
    pub query_text: String,
    pub results: Value,
    pub result_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CollectionRow {
    pub id: i64,
    pub collection_code: String,
    pub collection_name: String,
    pub package_count: i64,
    pub granule_count: Option<i64>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PackageRow {
    pub id: i64,
    pub package_id: String,
    pub title: Option<String>,
    pub collection_code: String,
    pub collection_name: Option<String>,
    pub category: Option<String>,
    pub date_issued: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub branch: Option<String>,
    pub congress: Option<String>,
    pub session: Option<String>,
    pub download_links: Option<Json<Value>>,
    pub related_links: Option<Json<Value>>,
    pub references_json: Option<Json<Value>>,
    pub metadata: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GranuleRow {
    pub id: i64,
    pub granule_id: String,
    pub package_id: String,
    pub title: Option<String>,
    pub granule_class: Option<String>,
    pub collection_code: Option<String>,
    pub date_issued: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub download_links: Option<Json<Value>>,
    pub metadata: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchCacheEntry {
    pub id: i64,
    pub query_hash: String,
    pub query_text: String,
    pub results_json: Json<Value>,
    pub result_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SearchCacheEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Filter for [`Store::list_packages`](crate::Store::list_packages)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    pub collection_code: Option<String>,
    pub congress: Option<String>,
    pub limit: Option<i64>,
}

impl PackageFilter {
    pub fn collection(mut self, code: impl Into<String>) -> Self {
        self.collection_code = Some(code.into());
        self
    }

    pub fn congress(mut self, congress: impl Into<String>) -> Self {
        self.congress = Some(congress.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
