//! Listing-to-store ingestion
//!
//! A run walks one listing page by page and upserts each record before
//! fetching the next page. Nothing is prefetched and nothing is retried: the
//! first error ends the run, and everything written before it stays written.

use crate::error::{IngestError, IngestFailure, Result};
use crate::sink::RecordStore;
use chrono::Utc;
use govinfo_client::{
    CollectionPackagesFetcher, Cursor, CursorWalker, GovInfoApi, GranuleInfo, GranulesFetcher,
    PackageInfo, PackageQuery, PageFetcher, WalkOutcome, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use govinfo_common::validators::is_known_collection;
use govinfo_store::{NewCollection, NewGranule, NewPackage, StoreError, StoreResult};
use tracing::{debug, info, warn};

/// How much of each record to fetch before writing it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Detail {
    /// Write the listing entry as is
    #[default]
    Basic,
    /// Fetch the record's summary and write that
    Full,
}

/// Whether to write records the store already has at the same revision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpsertPolicy {
    #[default]
    Always,
    /// Skip a record whose stored `last_modified` is not older than the
    /// incoming one. Skipped records still count as processed.
    SkipUnchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Stop after this many pages. `None` walks to the end.
    pub max_pages: Option<usize>,
    /// Overrides the page size of the query
    pub page_size: Option<u32>,
    pub detail: Detail,
    pub policy: UpsertPolicy,
}

impl IngestOptions {
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    pub fn policy(mut self, policy: UpsertPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Records handled, whether inserted, updated or skipped
    pub processed: usize,
    pub skipped: usize,
    pub pages: usize,
    pub outcome: WalkOutcome,
}

impl IngestReport {
    pub fn written(&self) -> usize {
        self.processed - self.skipped
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == WalkOutcome::Completed
    }
}

enum Disposition {
    Written,
    Skipped,
}

#[derive(Default)]
struct Tally {
    processed: usize,
    skipped: usize,
}

impl Tally {
    fn record(&mut self, disposition: Disposition) {
        self.processed += 1;
        if let Disposition::Skipped = disposition {
            self.skipped += 1;
        }
    }

    fn fail(&self, pages: usize, error: IngestError) -> IngestFailure {
        warn!(processed = self.processed, pages, error = %error, "Ingestion failed");
        IngestFailure {
            processed: self.processed,
            pages,
            error,
        }
    }

    fn finish(self, pages: usize, outcome: WalkOutcome) -> IngestReport {
        IngestReport {
            processed: self.processed,
            skipped: self.skipped,
            pages,
            outcome,
        }
    }
}

/// Fails a run before its first fetch when the parent row is missing.
fn require_parent(
    exists: StoreResult<bool>,
    kind: &'static str,
    id: &str,
) -> std::result::Result<(), IngestFailure> {
    let tally = Tally::default();
    match exists {
        Ok(true) => Ok(()),
        Ok(false) => Err(tally.fail(0, StoreError::missing_parent(kind, id).into())),
        Err(e) => Err(tally.fail(0, e.into())),
    }
}

/// Ingestion runs against one API and one store
pub struct Ingestion<'a, A: GovInfoApi + ?Sized, S: RecordStore + ?Sized> {
    api: &'a A,
    store: &'a S,
}

impl<'a, A: GovInfoApi + ?Sized, S: RecordStore + ?Sized> Ingestion<'a, A, S> {
    pub fn new(api: &'a A, store: &'a S) -> Self {
        Self { api, store }
    }

    /// Upsert every collection the API lists, stamping the sync time.
    pub async fn ingest_collections(&self) -> std::result::Result<IngestReport, IngestFailure> {
        let mut tally = Tally::default();

        let list = self
            .api
            .list_collections()
            .await
            .map_err(|e| tally.fail(0, e.into()))?;

        let synced_at = Utc::now();
        for summary in &list.collections {
            let collection = NewCollection::from(summary).synced_at(synced_at);
            self.store
                .upsert_collection(&collection)
                .await
                .map_err(|e| tally.fail(1, e.into()))?;
            tally.record(Disposition::Written);
        }

        info!(collections = tally.processed, "Collections ingested");
        Ok(tally.finish(1, WalkOutcome::Completed))
    }

    /// Walk the packages of one collection and upsert each of them.
    ///
    /// The collection row must already exist; nothing is fetched otherwise.
    pub async fn ingest_collection_packages(
        &self,
        query: &PackageQuery,
        options: &IngestOptions,
    ) -> std::result::Result<IngestReport, IngestFailure> {
        let query = match options.page_size {
            Some(size) => query.clone().page_size(size),
            None => query.clone(),
        };
        let collection_code = query.collection_code.clone();
        if !is_known_collection(&collection_code) {
            warn!(collection = %collection_code, "Collection code is not a known GovInfo collection");
        }
        require_parent(
            self.store.collection_exists(&collection_code).await,
            "collection",
            &collection_code,
        )?;

        info!(
            collection = %collection_code,
            since = %query.last_modified_start,
            page_size = query.get_page_size(),
            max_pages = ?options.max_pages,
            "Starting package ingestion"
        );

        let walker = CursorWalker::new(CollectionPackagesFetcher::new(self.api, query), Cursor::First)
            .with_optional_max_pages(options.max_pages);

        let report = self
            .drive(walker, |info: PackageInfo| {
                let collection_code = collection_code.clone();
                async move { self.package_record(&info, &collection_code, options).await }
            })
            .await?;

        info!(
            collection = %collection_code,
            processed = report.processed,
            skipped = report.skipped,
            pages = report.pages,
            outcome = ?report.outcome,
            "Package ingestion finished"
        );
        Ok(report)
    }

    /// Walk the granules of one package and upsert each of them.
    ///
    /// The package row must already exist; nothing is fetched otherwise.
    pub async fn ingest_package_granules(
        &self,
        package_id: &str,
        options: &IngestOptions,
    ) -> std::result::Result<IngestReport, IngestFailure> {
        require_parent(
            self.store.package_exists(package_id).await,
            "package",
            package_id,
        )?;

        let page_size = options
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        info!(package_id, page_size, max_pages = ?options.max_pages, "Starting granule ingestion");

        let fetcher = GranulesFetcher::new(self.api, package_id).page_size(page_size);
        let walker =
            CursorWalker::new(fetcher, Cursor::First).with_optional_max_pages(options.max_pages);

        let report = self
            .drive(walker, |info: GranuleInfo| async move {
                self.granule_record(&info, package_id, options).await
            })
            .await?;

        info!(
            package_id,
            processed = report.processed,
            skipped = report.skipped,
            pages = report.pages,
            outcome = ?report.outcome,
            "Granule ingestion finished"
        );
        Ok(report)
    }

    async fn drive<F, H, Fut>(
        &self,
        mut walker: CursorWalker<F>,
        mut handle: H,
    ) -> std::result::Result<IngestReport, IngestFailure>
    where
        F: PageFetcher,
        H: FnMut(F::Item) -> Fut,
        Fut: std::future::Future<Output = Result<Disposition>>,
    {
        let mut tally = Tally::default();

        loop {
            let page = match walker.next_page().await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(e) => return Err(tally.fail(walker.pages_fetched(), e.into())),
            };

            for item in page.items {
                match handle(item).await {
                    Ok(disposition) => tally.record(disposition),
                    Err(e) => return Err(tally.fail(walker.pages_fetched(), e)),
                }
            }
        }

        Ok(tally.finish(walker.pages_fetched(), walker.outcome()))
    }

    async fn package_record(
        &self,
        info: &PackageInfo,
        collection_code: &str,
        options: &IngestOptions,
    ) -> Result<Disposition> {
        if options.policy == UpsertPolicy::SkipUnchanged {
            let stored = self.store.package_last_modified(&info.package_id).await?;
            if matches!(stored, Some(stored) if stored >= info.last_modified) {
                debug!(package_id = %info.package_id, "Package unchanged, skipping");
                return Ok(Disposition::Skipped);
            }
        }

        let package = match options.detail {
            Detail::Basic => NewPackage::from_listing(info, collection_code),
            Detail::Full => {
                let summary = self.api.package_summary(&info.package_id).await?;
                NewPackage::from_summary(&summary)?
            }
        };

        let action = self.store.upsert_package(&package).await?;
        debug!(package_id = %package.package_id, ?action, "Package written");
        Ok(Disposition::Written)
    }

    async fn granule_record(
        &self,
        info: &GranuleInfo,
        package_id: &str,
        options: &IngestOptions,
    ) -> Result<Disposition> {
        let granule = match options.detail {
            Detail::Basic => NewGranule::from_listing(info, package_id),
            Detail::Full => {
                let summary = self.api.granule_summary(package_id, &info.granule_id).await?;

                // Listing entries carry no timestamp, so only summaries can be compared.
                if options.policy == UpsertPolicy::SkipUnchanged {
                    if let Some(incoming) = summary.last_modified.value() {
                        let stored = self.store.granule_last_modified(&info.granule_id).await?;
                        if matches!(stored, Some(stored) if stored >= *incoming) {
                            debug!(granule_id = %info.granule_id, "Granule unchanged, skipping");
                            return Ok(Disposition::Skipped);
                        }
                    }
                }

                NewGranule::from_summary(&summary)?
            }
        };

        let action = self.store.upsert_granule(&granule).await?;
        debug!(granule_id = %granule.granule_id, ?action, "Granule written");
        Ok(Disposition::Written)
    }
}
