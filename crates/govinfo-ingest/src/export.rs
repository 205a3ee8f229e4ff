//! Tabular export of API records and stored rows
//!
//! A [`Table`] is built from any [`Tabular`] records and written as CSV or
//! rendered for a terminal. Missing values become empty cells.

use crate::error::Result;
use chrono::{DateTime, Utc};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement};
use govinfo_client::models::{CollectionSummary, Field, PackageInfo, SearchResultItem};
use govinfo_store::{GranuleRow, PackageRow};
use std::io;

/// A record with a fixed set of columns
pub trait Tabular {
    fn columns() -> &'static [&'static str];

    /// Cell values in the order of [`columns`](Self::columns)
    fn row(&self) -> Vec<String>;
}

fn field(value: &Field<String>) -> String {
    value.as_deref().unwrap_or_default().to_string()
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}

impl Tabular for CollectionSummary {
    fn columns() -> &'static [&'static str] {
        &["collectionCode", "collectionName", "packageCount", "granuleCount"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.collection_code.clone(),
            self.collection_name.clone(),
            self.package_count.to_string(),
            self.granule_count
                .value()
                .map(|c| c.to_string())
                .unwrap_or_default(),
        ]
    }
}

impl Tabular for PackageInfo {
    fn columns() -> &'static [&'static str] {
        &["packageId", "title", "congress", "docClass", "dateIssued", "lastModified"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.package_id.clone(),
            field(&self.title),
            field(&self.congress),
            field(&self.doc_class),
            field(&self.date_issued),
            self.last_modified.to_rfc3339(),
        ]
    }
}

impl Tabular for SearchResultItem {
    fn columns() -> &'static [&'static str] {
        &["packageId", "granuleId", "title", "collectionCode", "dateIssued", "lastModified"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            field(&self.package_id),
            field(&self.granule_id),
            field(&self.title),
            field(&self.collection_code),
            field(&self.date_issued),
            field(&self.last_modified),
        ]
    }
}

impl Tabular for PackageRow {
    fn columns() -> &'static [&'static str] {
        &[
            "packageId",
            "collectionCode",
            "title",
            "congress",
            "dateIssued",
            "lastModified",
            "updatedAt",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.package_id.clone(),
            self.collection_code.clone(),
            opt(&self.title),
            opt(&self.congress),
            opt(&self.date_issued),
            timestamp(self.last_modified),
            self.updated_at.to_rfc3339(),
        ]
    }
}

impl Tabular for GranuleRow {
    fn columns() -> &'static [&'static str] {
        &["granuleId", "packageId", "title", "granuleClass", "dateIssued", "lastModified"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.granule_id.clone(),
            self.package_id.clone(),
            opt(&self.title),
            opt(&self.granule_class),
            opt(&self.date_issued),
            timestamp(self.last_modified),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records<'r, T, I>(records: I) -> Self
    where
        T: Tabular + 'r,
        I: IntoIterator<Item = &'r T>,
    {
        Self {
            headers: T::columns().iter().map(|c| c.to_string()).collect(),
            rows: records.into_iter().map(|record| record.row()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the header line followed by every row
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.headers)?;
        for row in &self.rows {
            csv.write_record(row)?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Box-drawn table for terminal output
    pub fn render(&self) -> String {
        let mut table = comfy_table::Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(&self.headers);

        for row in &self.rows {
            table.add_row(row);
        }

        table.to_string()
    }
}
