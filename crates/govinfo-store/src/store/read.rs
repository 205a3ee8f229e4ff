use super::Store;
use crate::error::StoreResult;
use crate::models::{CollectionRow, GranuleRow, PackageFilter, PackageRow};
use sqlx::{QueryBuilder, Sqlite};

const COLLECTION_COLUMNS: &str = "id, collection_code, collection_name, package_count, \
     granule_count, last_synced_at, created_at, updated_at";

const PACKAGE_COLUMNS: &str = "id, package_id, title, collection_code, collection_name, \
     category, date_issued, last_modified, branch, congress, session, download_links, \
     related_links, references_json, metadata, created_at, updated_at";

const GRANULE_COLUMNS: &str = "id, granule_id, package_id, title, granule_class, \
     collection_code, date_issued, last_modified, download_links, metadata, created_at, \
     updated_at";

impl Store {
    pub async fn get_collection(&self, collection_code: &str) -> StoreResult<Option<CollectionRow>> {
        let sql = format!(
            "SELECT {} FROM collections WHERE collection_code = ?1",
            COLLECTION_COLUMNS
        );
        Ok(sqlx::query_as::<_, CollectionRow>(&sql)
            .bind(collection_code)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn collection_exists(&self, collection_code: &str) -> StoreResult<bool> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM collections WHERE collection_code = ?1)",
        )
        .bind(collection_code)
        .fetch_one(&self.pool)
        .await?)
    }

    /// All collections, ordered by code
    pub async fn list_collections(&self) -> StoreResult<Vec<CollectionRow>> {
        let sql = format!(
            "SELECT {} FROM collections ORDER BY collection_code",
            COLLECTION_COLUMNS
        );
        Ok(sqlx::query_as::<_, CollectionRow>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn get_package(&self, package_id: &str) -> StoreResult<Option<PackageRow>> {
        let sql = format!("SELECT {} FROM packages WHERE package_id = ?1", PACKAGE_COLUMNS);
        Ok(sqlx::query_as::<_, PackageRow>(&sql)
            .bind(package_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn package_exists(&self, package_id: &str) -> StoreResult<bool> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM packages WHERE package_id = ?1)")
                .bind(package_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    /// Packages matching `filter`, most recently modified first
    pub async fn list_packages(&self, filter: &PackageFilter) -> StoreResult<Vec<PackageRow>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        query.push(PACKAGE_COLUMNS).push(" FROM packages WHERE 1 = 1");

        if let Some(code) = &filter.collection_code {
            query.push(" AND collection_code = ").push_bind(code);
        }
        if let Some(congress) = &filter.congress {
            query.push(" AND congress = ").push_bind(congress);
        }

        query.push(" ORDER BY last_modified DESC, package_id");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        Ok(query
            .build_query_as::<PackageRow>()
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn count_packages(&self, collection_code: Option<&str>) -> StoreResult<i64> {
        let count = match collection_code {
            Some(code) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM packages WHERE collection_code = ?1")
                    .bind(code)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM packages")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    pub async fn get_granule(&self, granule_id: &str) -> StoreResult<Option<GranuleRow>> {
        let sql = format!("SELECT {} FROM granules WHERE granule_id = ?1", GRANULE_COLUMNS);
        Ok(sqlx::query_as::<_, GranuleRow>(&sql)
            .bind(granule_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_granules(&self, package_id: &str) -> StoreResult<Vec<GranuleRow>> {
        let sql = format!(
            "SELECT {} FROM granules WHERE package_id = ?1 ORDER BY granule_id",
            GRANULE_COLUMNS
        );
        Ok(sqlx::query_as::<_, GranuleRow>(&sql)
            .bind(package_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn count_granules(&self, package_id: &str) -> StoreResult<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM granules WHERE package_id = ?1")
                .bind(package_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }
}
