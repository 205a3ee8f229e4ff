//! API endpoint URL builders
//!
//! Paths only; query parameters (including `api_key`) are attached by the
//! client. Identifiers are percent-encoded as single path segments.

use crate::models::ContentFormat;

pub fn collections_url(base_url: &str) -> String {
    format!("{}/collections", base_url)
}

/// Collection listing by last-modified range. Dates go in as already-formatted
/// ISO 8601 strings.
pub fn collection_packages_url(
    base_url: &str,
    collection_code: &str,
    start: &str,
    end: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/collections/{}/{}",
        base_url,
        urlencoding::encode(collection_code),
        start
    );

    if let Some(end) = end {
        url.push('/');
        url.push_str(end);
    }

    url
}

/// Published listing by issue date (`YYYY-MM-DD`)
pub fn published_url(base_url: &str, start: &str, end: Option<&str>) -> String {
    match end {
        Some(end) => format!("{}/published/{}/{}", base_url, start, end),
        None => format!("{}/published/{}", base_url, start),
    }
}

pub fn package_summary_url(base_url: &str, package_id: &str) -> String {
    format!(
        "{}/packages/{}/summary",
        base_url,
        urlencoding::encode(package_id)
    )
}

pub fn package_content_url(base_url: &str, package_id: &str, format: ContentFormat) -> String {
    format!(
        "{}/packages/{}/{}",
        base_url,
        urlencoding::encode(package_id),
        format.as_str()
    )
}

pub fn package_granules_url(base_url: &str, package_id: &str) -> String {
    format!(
        "{}/packages/{}/granules",
        base_url,
        urlencoding::encode(package_id)
    )
}

pub fn granule_summary_url(base_url: &str, package_id: &str, granule_id: &str) -> String {
    format!(
        "{}/packages/{}/granules/{}/summary",
        base_url,
        urlencoding::encode(package_id),
        urlencoding::encode(granule_id)
    )
}

pub fn search_url(base_url: &str) -> String {
    format!("{}/search", base_url)
}

pub fn related_url(base_url: &str, package_id: &str, relationship: Option<&str>) -> String {
    let mut url = format!("{}/related/{}", base_url, urlencoding::encode(package_id));

    if let Some(relationship) = relationship {
        url.push('/');
        url.push_str(&urlencoding::encode(relationship));
    }

    url
}
