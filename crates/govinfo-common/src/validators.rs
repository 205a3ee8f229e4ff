//! Identifier validation

use crate::error::{GovInfoError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Collection codes published by the GovInfo API.
pub const KNOWN_COLLECTIONS: &[&str] = &[
    "BILLS",
    "BILLSTATUS",
    "CHRG",
    "FR",
    "CREC",
    "CRECB",
    "CFR",
    "PLAW",
    "USCOURTS",
    "GAOREPORTS",
    "CRPT",
    "CPRT",
    "CDOC",
    "CCAL",
    "GOVPUB",
    "CPD",
    "CZIC",
    "GPO",
    "PAI",
    "USCODE",
    "ERIC",
    "BUDGET",
    "ECONI",
    "LSA",
    "PPP",
    "STATUTE",
    "HOB",
    "ERP",
    "GOVMAN",
    "CDIR",
    "HMAN",
    "SMAN",
    "HJOURNAL",
];

fn package_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"^[A-Z]+-[A-Za-z0-9\-]+$").expect("static package id pattern")
    })
}

/// Case-insensitive membership check against [`KNOWN_COLLECTIONS`].
pub fn is_known_collection(code: &str) -> bool {
    let upper = code.trim().to_ascii_uppercase();
    KNOWN_COLLECTIONS.contains(&upper.as_str())
}

/// Uppercase a collection code, rejecting unknown codes.
pub fn normalize_collection_code(code: &str) -> Result<String> {
    let upper = code.trim().to_ascii_uppercase();
    if KNOWN_COLLECTIONS.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(GovInfoError::InvalidCollection(code.to_string()))
    }
}

/// Package ids look like `BILLS-115hr1625enr`: a known collection code, a
/// dash, then alphanumerics and dashes.
pub fn is_valid_package_id(package_id: &str) -> bool {
    if !package_id_pattern().is_match(package_id) {
        return false;
    }
    package_id
        .split_once('-')
        .is_some_and(|(code, _)| is_known_collection(code))
}

/// Like [`is_valid_package_id`] but returns an error naming the bad id.
pub fn validate_package_id(package_id: &str) -> Result<()> {
    if is_valid_package_id(package_id) {
        Ok(())
    } else {
        Err(GovInfoError::InvalidPackageId(package_id.to_string()))
    }
}
