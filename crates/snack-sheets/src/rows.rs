//! Turning a grid of cell values into header-keyed records.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use snack_core::Record;

/// Body of `GET /v4/spreadsheets/{key}/values/{range}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
    /// Missing entirely when the range is empty.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Body of `GET /v4/spreadsheets/{key}?fields=sheets.properties`.
#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetProperties {
    pub title: String,
    #[serde(default)]
    pub index: u32,
}

impl SpreadsheetMeta {
    /// Title of the leftmost worksheet.
    pub fn first_title(&self) -> Option<&str> {
        self.sheets
            .iter()
            .min_by_key(|sheet| sheet.properties.index)
            .map(|sheet| sheet.properties.title.as_str())
    }
}

/// Quote a worksheet title for use as an A1 range.
pub(crate) fn a1_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}

/// Map rows to records using the first row as the header.
///
/// The API drops trailing empty cells, so short rows are padded with empty
/// strings. Cells past the header width and columns with a blank header are
/// dropped. Record rows are numbered the way the sheet shows them, so the
/// first data row is row 2.
pub fn records_from_values(values: &[Vec<Value>]) -> Vec<Record> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };
    let header: Vec<String> = header.iter().map(cell_text).collect();

    rows.iter()
        .enumerate()
        .map(|(offset, row)| {
            let fields: BTreeMap<String, String> = header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(col, name)| {
                    let cell = row.get(col).map(cell_text).unwrap_or_default();
                    (name.clone(), cell)
                })
                .collect();
            Record::new(offset + 2, fields)
        })
        .collect()
}
