//! `GET /published` listing and the content/related helpers

use super::{Field, PackageInfo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response of `GET /published/{start}[/{end}]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPackages {
    pub count: i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub message: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub next_page: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub previous_page: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub offset_mark: Field<String>,
    #[serde(default)]
    pub packages: Vec<PackageInfo>,
}

/// Relationship lookups have no fixed shape across collections
pub type RelatedDocuments = serde_json::Value;

/// Downloadable renditions of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Pdf,
    Xml,
    Htm,
    Mods,
    Premis,
    Zip,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Xml => "xml",
            Self::Htm => "htm",
            Self::Mods => "mods",
            Self::Premis => "premis",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "xml" => Ok(Self::Xml),
            "htm" | "html" => Ok(Self::Htm),
            "mods" => Ok(Self::Mods),
            "premis" => Ok(Self::Premis),
            "zip" => Ok(Self::Zip),
            other => Err(format!("Unknown content format: {}", other)),
        }
    }
}
