//! Cursor-paginated listing walker
//!
//! GovInfo listings page with an opaque `offsetMark` token. The first request
//! uses the sentinel `*`; each response carries a `nextPage` URL whose
//! `offsetMark` query parameter is the token for the following page. The
//! listing is exhausted when a response has no usable `nextPage`.
//!
//! Token extraction lives with the response types ([`Listing`]); the
//! [`CursorWalker`] only threads whatever cursor the fetcher hands back.

use crate::api::GovInfoApi;
use crate::config::DEFAULT_BASE_URL;
use crate::error::Result;
use crate::models::{
    CollectionPackages, Field, GranuleInfo, GranuleList, PackageInfo, PublishedPackages,
    SearchResultItem, SearchResults,
};
use crate::query::{PackageQuery, PublishedQuery, DEFAULT_PAGE_SIZE};
use async_trait::async_trait;
use std::fmt;
use tracing::debug;
use url::Url;

const FIRST_PAGE_MARK: &str = "*";
const OFFSET_MARK_PARAM: &str = "offsetMark";

/// Position in a paginated listing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Start of the listing, sent as `*`
    First,
    /// Server-issued continuation token, passed back verbatim
    Token(String),
}

impl Cursor {
    /// Map a raw `offsetMark` value to a cursor.
    pub fn from_mark(mark: impl Into<String>) -> Self {
        let mark = mark.into();
        if mark == FIRST_PAGE_MARK {
            Self::First
        } else {
            Self::Token(mark)
        }
    }

    /// Value for the `offsetMark` query parameter
    pub fn as_str(&self) -> &str {
        match self {
            Self::First => FIRST_PAGE_MARK,
            Self::Token(token) => token,
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Self::First)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::First
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a listing plus the cursor for the page after it
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` when this is the last page
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<Cursor>) -> Self {
        Self { items, next }
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Extract the continuation cursor from a `nextPage` value.
///
/// Relative links are resolved against the production API root. Returns
/// `None` when the link is absent, `null`, unparseable, or lacks a non-empty
/// `offsetMark`. Only percent-escapes are decoded; a literal `+` stays a `+`.
pub fn cursor_from_next_page(next_page: &Field<String>) -> Option<Cursor> {
    let link = next_page.as_deref()?.trim();
    if link.is_empty() {
        return None;
    }

    let url = Url::parse(DEFAULT_BASE_URL)
        .and_then(|base| base.join(link))
        .ok()?;

    let raw = url
        .query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == OFFSET_MARK_PARAM)
        .map(|(_, value)| value)?;

    urlencoding::decode(raw)
        .ok()
        .map(|mark| mark.into_owned())
        .filter(|mark| !mark.is_empty())
        .map(Cursor::from_mark)
}

/// A paginated response envelope
pub trait Listing {
    type Item;

    fn next_page_link(&self) -> &Field<String>;

    fn into_items(self) -> Vec<Self::Item>;

    fn next_cursor(&self) -> Option<Cursor> {
        cursor_from_next_page(self.next_page_link())
    }

    fn into_page(self) -> Page<Self::Item>
    where
        Self: Sized,
    {
        let next = self.next_cursor();
        Page::new(self.into_items(), next)
    }
}

impl Listing for CollectionPackages {
    type Item = PackageInfo;

    fn next_page_link(&self) -> &Field<String> {
        &self.next_page
    }

    fn into_items(self) -> Vec<PackageInfo> {
        self.packages
    }
}

impl Listing for PublishedPackages {
    type Item = PackageInfo;

    fn next_page_link(&self) -> &Field<String> {
        &self.next_page
    }

    fn into_items(self) -> Vec<PackageInfo> {
        self.packages
    }
}

impl Listing for GranuleList {
    type Item = GranuleInfo;

    fn next_page_link(&self) -> &Field<String> {
        &self.next_page
    }

    fn into_items(self) -> Vec<GranuleInfo> {
        self.granules
    }
}

impl Listing for SearchResults {
    type Item = SearchResultItem;

    fn next_page_link(&self) -> &Field<String> {
        &self.next_page
    }

    fn into_items(self) -> Vec<SearchResultItem> {
        self.results
    }
}

/// Fetches a single page at a cursor
#[async_trait]
pub trait PageFetcher: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<Self::Item>>;
}

/// How far a walk got
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    InProgress,
    /// The last page had no continuation
    Completed,
    /// Stopped at the page cap with more pages available
    Capped,
}

/// Walks a listing one page per call
///
/// Only the cursor is retained between calls; pages are handed to the caller.
/// A fetch error is returned unchanged and leaves the walker at the cursor it
/// was trying, so calling [`next_page`](Self::next_page) again retries that page.
pub struct CursorWalker<F: PageFetcher> {
    fetcher: F,
    cursor: Option<Cursor>,
    max_pages: Option<usize>,
    pages_fetched: usize,
    outcome: WalkOutcome,
}

impl<F: PageFetcher> CursorWalker<F> {
    pub fn new(fetcher: F, start: Cursor) -> Self {
        Self {
            fetcher,
            cursor: Some(start),
            max_pages: None,
            pages_fetched: 0,
            outcome: WalkOutcome::InProgress,
        }
    }

    /// Stop after `max_pages` pages even if more are available.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_optional_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn cap_reached(&self) -> bool {
        match self.max_pages {
            Some(max) => self.pages_fetched >= max,
            None => false,
        }
    }

    /// Fetch the next page, or `Ok(None)` once the walk has finished.
    pub async fn next_page(&mut self) -> Result<Option<Page<F::Item>>> {
        if self.outcome != WalkOutcome::InProgress {
            return Ok(None);
        }

        let cursor = match &self.cursor {
            Some(cursor) => cursor,
            None => {
                self.outcome = WalkOutcome::Completed;
                return Ok(None);
            }
        };

        if self.cap_reached() {
            self.outcome = WalkOutcome::Capped;
            return Ok(None);
        }

        let page = self.fetcher.fetch_page(cursor).await?;
        self.pages_fetched += 1;
        self.cursor = page.next.clone();

        if self.cursor.is_none() {
            self.outcome = WalkOutcome::Completed;
        } else if self.cap_reached() {
            self.outcome = WalkOutcome::Capped;
        }

        debug!(
            page = self.pages_fetched,
            items = page.items.len(),
            has_next = self.cursor.is_some(),
            "Fetched listing page"
        );

        Ok(Some(page))
    }

    pub fn outcome(&self) -> WalkOutcome {
        self.outcome
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Cursor the walk would continue from; `None` once completed.
    pub fn resume_cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn into_fetcher(self) -> F {
        self.fetcher
    }
}

// ============================================================================
// Fetchers over GovInfoApi
// ============================================================================

/// Pages of `GET /collections/{code}/...`
pub struct CollectionPackagesFetcher<'a, A: GovInfoApi + ?Sized> {
    api: &'a A,
    query: PackageQuery,
}

impl<'a, A: GovInfoApi + ?Sized> CollectionPackagesFetcher<'a, A> {
    pub fn new(api: &'a A, query: PackageQuery) -> Self {
        Self { api, query }
    }
}

#[async_trait]
impl<'a, A: GovInfoApi + ?Sized> PageFetcher for CollectionPackagesFetcher<'a, A> {
    type Item = PackageInfo;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<PackageInfo>> {
        Ok(self
            .api
            .collection_packages(&self.query, cursor)
            .await?
            .into_page())
    }
}

/// Pages of `GET /published/...`
pub struct PublishedPackagesFetcher<'a, A: GovInfoApi + ?Sized> {
    api: &'a A,
    query: PublishedQuery,
}

impl<'a, A: GovInfoApi + ?Sized> PublishedPackagesFetcher<'a, A> {
    pub fn new(api: &'a A, query: PublishedQuery) -> Self {
        Self { api, query }
    }
}

#[async_trait]
impl<'a, A: GovInfoApi + ?Sized> PageFetcher for PublishedPackagesFetcher<'a, A> {
    type Item = PackageInfo;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<PackageInfo>> {
        Ok(self
            .api
            .published_packages(&self.query, cursor)
            .await?
            .into_page())
    }
}

/// Pages of `GET /packages/{id}/granules`
pub struct GranulesFetcher<'a, A: GovInfoApi + ?Sized> {
    api: &'a A,
    package_id: String,
    page_size: u32,
}

impl<'a, A: GovInfoApi + ?Sized> GranulesFetcher<'a, A> {
    pub fn new(api: &'a A, package_id: impl Into<String>) -> Self {
        Self {
            api,
            package_id: package_id.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[async_trait]
impl<'a, A: GovInfoApi + ?Sized> PageFetcher for GranulesFetcher<'a, A> {
    type Item = GranuleInfo;

    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<GranuleInfo>> {
        Ok(self
            .api
            .package_granules(&self.package_id, cursor, self.page_size)
            .await?
            .into_page())
    }
}
