//! Listing query parameters
//!
//! A query describes *what* to list; the cursor describing *where* in the
//! listing to continue is passed separately so the same query can be walked
//! page by page.

use chrono::{DateTime, NaiveDate, Utc};

pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Upper bound the API accepts for `pageSize`
pub const MAX_PAGE_SIZE: u32 = 1000;

fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Packages of one collection modified within a time range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageQuery {
    pub collection_code: String,
    pub last_modified_start: DateTime<Utc>,
    pub last_modified_end: Option<DateTime<Utc>>,
    page_size: u32,
}

impl PackageQuery {
    pub fn new(collection_code: impl Into<String>, last_modified_start: DateTime<Utc>) -> Self {
        Self {
            collection_code: collection_code.into(),
            last_modified_start,
            last_modified_end: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn until(mut self, last_modified_end: DateTime<Utc>) -> Self {
        self.last_modified_end = Some(last_modified_end);
        self
    }

    /// Values outside `1..=1000` are clamped.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    pub fn get_page_size(&self) -> u32 {
        self.page_size
    }
}

/// Packages by publication date, optionally narrowed by collection and more
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedQuery {
    pub date_issued_start: NaiveDate,
    pub date_issued_end: Option<NaiveDate>,
    pub collections: Vec<String>,
    pub doc_class: Option<String>,
    pub congress: Option<String>,
    pub modified_since: Option<DateTime<Utc>>,
    page_size: u32,
}

impl PublishedQuery {
    pub fn new(date_issued_start: NaiveDate) -> Self {
        Self {
            date_issued_start,
            date_issued_end: None,
            collections: Vec::new(),
            doc_class: None,
            congress: None,
            modified_since: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn until(mut self, date_issued_end: NaiveDate) -> Self {
        self.date_issued_end = Some(date_issued_end);
        self
    }

    pub fn collection(mut self, code: impl Into<String>) -> Self {
        self.collections.push(code.into());
        self
    }

    pub fn doc_class(mut self, doc_class: impl Into<String>) -> Self {
        self.doc_class = Some(doc_class.into());
        self
    }

    pub fn congress(mut self, congress: impl Into<String>) -> Self {
        self.congress = Some(congress.into());
        self
    }

    pub fn modified_since(mut self, since: DateTime<Utc>) -> Self {
        self.modified_since = Some(since);
        self
    }

    /// Values outside `1..=1000` are clamped.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    pub fn get_page_size(&self) -> u32 {
        self.page_size
    }
}
