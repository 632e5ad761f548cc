// Record parser: delimited export text into label -> raw value rows.

use std::collections::HashMap;
use tracing::debug;

use crate::columns::{StatCategory, TOTALS_MARKER};
use crate::normalize::{normalize_count, normalize_number};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One data row of an export, keyed by verbatim (trimmed) column label.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    key: String,
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Value of the first column (the player name), exactly as exported.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw value under `label`, or `""` when the row lacks that column.
    pub fn get(&self, label: &str) -> &str {
        self.fields.get(label).map(String::as_str).unwrap_or("")
    }

    /// Whether `label` is present with a non-blank value.
    pub fn has_value(&self, label: &str) -> bool {
        !self.get(label).trim().is_empty()
    }

    pub fn number(&self, label: &str) -> f64 {
        normalize_number(self.get(label))
    }

    pub fn count(&self, label: &str) -> u32 {
        normalize_count(self.get(label))
    }
}

/// All data rows of one export, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub category: StatCategory,
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse one export.
///
/// Header labels are trimmed. Blank lines are skipped, and so is any row
/// whose first column is blank, the totals footer, or a repeat of the header
/// label. Short rows read missing trailing fields as `""`; extra trailing
/// fields are ignored. A repeated header label keeps its first column.
pub fn parse_table(category: StatCategory, text: &str) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.trim().to_string()
        })
        .collect();
    let key_label = headers.first().cloned().unwrap_or_default();

    let mut rows = Vec::new();
    let mut raw_count = 0usize;
    for result in reader.records() {
        let record = result?;
        raw_count += 1;

        let key = record.get(0).unwrap_or("");
        if is_excluded_key(key, &key_label) {
            continue;
        }

        let mut fields = HashMap::with_capacity(headers.len());
        for (i, label) in headers.iter().enumerate() {
            fields
                .entry(label.clone())
                .or_insert_with(|| record.get(i).unwrap_or("").to_string());
        }

        rows.push(RawRecord {
            key: key.to_string(),
            fields,
        });
    }

    debug!(
        "Parsed {} export: {} raw rows, {} data rows",
        category,
        raw_count,
        rows.len()
    );

    Ok(RawTable {
        category,
        headers,
        rows,
    })
}

/// Blank names, the totals footer, and echoed header rows are not players.
fn is_excluded_key(key: &str, key_label: &str) -> bool {
    let key = key.trim();
    key.is_empty() || key == TOTALS_MARKER || key == key_label
}

/// Whether `text` parses, has at least one data row, and carries every
/// label in `expected` as a header.
pub fn validate_headers(category: StatCategory, text: &str, expected: &[&str]) -> bool {
    match parse_table(category, text) {
        Ok(table) => {
            !table.is_empty()
                && expected
                    .iter()
                    .all(|label| table.headers.iter().any(|h| h == label))
        }
        Err(_) => false,
    }
}
