//! Typed records for GovInfo API payloads
//!
//! Field names follow the server's camelCase keys. Optional values use
//! [`Field`] so that a key sent as `null` is not confused with a missing key.

pub mod collection;
pub mod field;
pub mod granule;
pub mod package;
pub mod published;
pub mod search;

pub use collection::{CollectionList, CollectionPackages, CollectionSummary, PackageInfo};
pub use field::Field;
pub use granule::{GranuleInfo, GranuleList, GranuleSummary};
pub use package::{
    DownloadLinks, OtherIdentifier, PackageReference, PackageSummary, ReferenceContent,
    RelatedLinks,
};
pub use published::{ContentFormat, PublishedPackages, RelatedDocuments};
pub use search::{
    SearchRequest, SearchResultItem, SearchResults, SortField, SortKey, SortOrder,
    DEFAULT_SEARCH_PAGE_SIZE,
};
