//! Insert-or-overwrite by natural key
//!
//! Each upsert is a single statement, so it takes the write lock up front and
//! waits out concurrent writers instead of failing on a lock upgrade. A
//! missing parent surfaces as a foreign key violation; `RETURNING` tells an
//! insert from an update.

use super::Store;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewCollection, NewGranule, NewPackage, UpsertAction};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use tracing::debug;

/// Appended to every upsert. Only a fresh insert carries identical stamps.
const RETURNING_INSERTED: &str = " RETURNING created_at = updated_at";

fn action(inserted: bool) -> UpsertAction {
    if inserted {
        UpsertAction::Inserted
    } else {
        UpsertAction::Updated
    }
}

fn parent_violation(err: sqlx::Error, kind: &'static str, id: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            StoreError::missing_parent(kind, id)
        }
        _ => StoreError::Database(err),
    }
}

impl Store {
    pub async fn upsert_collection(&self, collection: &NewCollection) -> StoreResult<UpsertAction> {
        let now = Utc::now();
        let sql = format!(
            "{}{}",
            r#"
            INSERT INTO collections
                (collection_code, collection_name, package_count, granule_count,
                 last_synced_at, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ON CONFLICT(collection_code) DO UPDATE SET
                collection_name = excluded.collection_name,
                package_count = excluded.package_count,
                granule_count = excluded.granule_count,
                last_synced_at = excluded.last_synced_at,
                updated_at = excluded.updated_at
            "#,
            RETURNING_INSERTED
        );

        let inserted: bool = sqlx::query_scalar(&sql)
            .bind(&collection.collection_code)
            .bind(&collection.collection_name)
            .bind(collection.package_count)
            .bind(collection.granule_count)
            .bind(collection.last_synced_at)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        let action = action(inserted);
        debug!(collection = %collection.collection_code, ?action, "Upserted collection");
        Ok(action)
    }

    pub async fn upsert_package(&self, package: &NewPackage) -> StoreResult<UpsertAction> {
        let now = Utc::now();
        let sql = format!(
            "{}{}",
            r#"
            INSERT INTO packages
                (package_id, title, collection_code, collection_name, category,
                 date_issued, last_modified, branch, congress, session,
                 download_links, related_links, references_json, metadata,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15)
            ON CONFLICT(package_id) DO UPDATE SET
                title = excluded.title,
                collection_code = excluded.collection_code,
                collection_name = excluded.collection_name,
                category = excluded.category,
                date_issued = excluded.date_issued,
                last_modified = excluded.last_modified,
                branch = excluded.branch,
                congress = excluded.congress,
                session = excluded.session,
                download_links = excluded.download_links,
                related_links = excluded.related_links,
                references_json = excluded.references_json,
                metadata = excluded.metadata,
                updated_at = excluded.updated_at
            "#,
            RETURNING_INSERTED
        );

        let inserted: bool = sqlx::query_scalar(&sql)
            .bind(&package.package_id)
            .bind(&package.title)
            .bind(&package.collection_code)
            .bind(&package.collection_name)
            .bind(&package.category)
            .bind(&package.date_issued)
            .bind(package.last_modified)
            .bind(&package.branch)
            .bind(&package.congress)
            .bind(&package.session)
            .bind(package.download_links.as_ref().map(Json))
            .bind(package.related_links.as_ref().map(Json))
            .bind(package.references.as_ref().map(Json))
            .bind(package.metadata.as_ref().map(Json))
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| parent_violation(e, "collection", &package.collection_code))?;

        let action = action(inserted);
        debug!(package_id = %package.package_id, ?action, "Upserted package");
        Ok(action)
    }

    pub async fn upsert_granule(&self, granule: &NewGranule) -> StoreResult<UpsertAction> {
        let now = Utc::now();
        let sql = format!(
            "{}{}",
            r#"
            INSERT INTO granules
                (granule_id, package_id, title, granule_class, collection_code,
                 date_issued, last_modified, download_links, metadata,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            ON CONFLICT(granule_id) DO UPDATE SET
                package_id = excluded.package_id,
                title = excluded.title,
                granule_class = excluded.granule_class,
                collection_code = excluded.collection_code,
                date_issued = excluded.date_issued,
                last_modified = excluded.last_modified,
                download_links = excluded.download_links,
                metadata = excluded.metadata,
                updated_at = excluded.updated_at
            "#,
            RETURNING_INSERTED
        );

        let inserted: bool = sqlx::query_scalar(&sql)
            .bind(&granule.granule_id)
            .bind(&granule.package_id)
            .bind(&granule.title)
            .bind(&granule.granule_class)
            .bind(&granule.collection_code)
            .bind(&granule.date_issued)
            .bind(granule.last_modified)
            .bind(granule.download_links.as_ref().map(Json))
            .bind(granule.metadata.as_ref().map(Json))
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| parent_violation(e, "package", &granule.package_id))?;

        let action = action(inserted);
        debug!(granule_id = %granule.granule_id, ?action, "Upserted granule");
        Ok(action)
    }

    /// Stored `last_modified` of a package, for callers that skip unchanged records.
    /// `None` when the package is unknown or has no timestamp.
    pub async fn package_last_modified(
        &self,
        package_id: &str,
    ) -> StoreResult<Option<DateTime<Utc>>> {
        let value: Option<Option<DateTime<Utc>>> =
            sqlx::query_scalar("SELECT last_modified FROM packages WHERE package_id = ?1")
                .bind(package_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.flatten())
    }

    pub async fn granule_last_modified(
        &self,
        granule_id: &str,
    ) -> StoreResult<Option<DateTime<Utc>>> {
        let value: Option<Option<DateTime<Utc>>> =
            sqlx::query_scalar("SELECT last_modified FROM granules WHERE granule_id = ?1")
                .bind(granule_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.flatten())
    }
}
