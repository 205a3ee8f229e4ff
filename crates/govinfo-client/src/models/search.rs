//! Search request/response types for `POST /search`

use super::Field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "score")]
    Score,
    #[serde(rename = "publishdate")]
    PublishDate,
    #[serde(rename = "lastModified")]
    LastModified,
    #[serde(rename = "title")]
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortField {
    pub field: SortKey,
    pub sort_order: SortOrder,
}

impl SortField {
    pub fn new(field: SortKey, sort_order: SortOrder) -> Self {
        Self { field, sort_order }
    }
}

impl Default for SortField {
    fn default() -> Self {
        Self::new(SortKey::Score, SortOrder::Desc)
    }
}

/// Body of `POST /search`
///
/// The server expects `pageSize` as a string, so it is kept as one here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub page_size: String,
    pub offset_mark: String,
    pub sorts: Vec<SortField>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_size: DEFAULT_SEARCH_PAGE_SIZE.to_string(),
            offset_mark: "*".to_string(),
            sorts: vec![SortField::default()],
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.to_string();
        self
    }

    pub fn offset_mark(mut self, offset_mark: impl Into<String>) -> Self {
        self.offset_mark = offset_mark.into();
        self
    }

    pub fn sorts(mut self, sorts: Vec<SortField>) -> Self {
        self.sorts = sorts;
        self
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pageSize={})", self.query, self.page_size)
    }
}

/// One search hit. Every field is optional; unrecognized keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub package_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub granule_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub congress: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub session: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub collection_code: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub collection_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub category: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub date_issued: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub last_modified: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub government_author1: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub government_author2: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub publisher: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub download: Field<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub details_link: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub count: i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub offset_mark: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub next_page: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub previous_page: Field<String>,
    #[serde(default)]
    pub results: Vec<SearchResultItem>,
}
