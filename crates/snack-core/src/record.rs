//! Spreadsheet rows and the columns the filter reads from them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bucket::TimeBucket;
use crate::errors::RecordError;

/// Column holding the item name.
pub const ITEM: &str = "Item";
/// Column holding the comma-separated month allow-list.
pub const ACCEPTABLE_MONTHS: &str = "Acceptable Months";
/// Column holding the free-text restriction note.
pub const OTHER_RESTRICTIONS: &str = "Other Restrictions";

/// Literal a time-of-day flag must equal to count as set.
pub const FLAG_TRUE: &str = "TRUE";

/// One row of the availability sheet, keyed by header name.
///
/// Every cell is kept as the string the sheet displayed. Columns the filter
/// does not know about are kept too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row: usize,
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Build a record from its position in the source and its cells.
    pub fn new(row: usize, fields: BTreeMap<String, String>) -> Self {
        Self { row, fields }
    }

    /// Convenience constructor from `(header, value)` pairs.
    pub fn from_pairs<K, V, I>(row: usize, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            row,
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Position of the row in its source (1-based sheet row number when
    /// fetched from Google Sheets).
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Look up a column that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] when the column is absent.
    pub fn require(&self, field: &str) -> Result<&str, RecordError> {
        self.get(field).ok_or_else(|| RecordError::MissingField {
            row: self.row,
            field: field.to_string(),
        })
    }

    /// Whether the flag column for `bucket` is exactly `"TRUE"`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] when the row has no such column.
    pub fn flag(&self, bucket: TimeBucket) -> Result<bool, RecordError> {
        Ok(self.require(bucket.column())? == FLAG_TRUE)
    }

    /// Whether the month allow-list admits `month` (an English full month
    /// name). An empty allow-list admits every month.
    ///
    /// Entries are trimmed before comparison, so `"November, December"`
    /// admits December. This is wider than a plain `split(',')` match,
    /// which admits only the first month of such a list.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] when the row has no
    /// `Acceptable Months` column.
    pub fn allows_month(&self, month: &str) -> Result<bool, RecordError> {
        let months = self.require(ACCEPTABLE_MONTHS)?;
        if months.is_empty() {
            return Ok(true);
        }
        Ok(months.split(',').any(|entry| entry.trim() == month))
    }

    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] when the row has no `Item` column.
    pub fn item(&self) -> Result<&str, RecordError> {
        self.require(ITEM)
    }

    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] when the row has no
    /// `Other Restrictions` column.
    pub fn other_restrictions(&self) -> Result<&str, RecordError> {
        self.require(OTHER_RESTRICTIONS)
    }
}

/// The noun a deployment uses for its items.
///
/// Controls the JSON keys of the API response: `snacks`/`snack` or
/// `biscuits`/`biscuit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLabel {
    #[default]
    Snack,
    Biscuit,
}

impl ItemLabel {
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Snack => "snack",
            Self::Biscuit => "biscuit",
        }
    }

    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Snack => "snacks",
            Self::Biscuit => "biscuits",
        }
    }
}

impl fmt::Display for ItemLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biscuit(months: &str) -> Record {
        Record::from_pairs(
            2,
            [
                (ITEM, "Tea Biscuit"),
                ("Morning", "TRUE"),
                ("Afternoon", "FALSE"),
                ("Evening", "true"),
                (ACCEPTABLE_MONTHS, months),
                (OTHER_RESTRICTIONS, "Only with tea"),
            ],
        )
    }

    #[test]
    fn flag_requires_exact_uppercase_true() {
        let record = biscuit("");
        assert!(record.flag(TimeBucket::Morning).unwrap());
        assert!(!record.flag(TimeBucket::Afternoon).unwrap());
        assert!(!record.flag(TimeBucket::Evening).unwrap());
    }

    #[test]
    fn missing_flag_column_is_an_error() {
        let err = biscuit("").flag(TimeBucket::Night).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                row: 2,
                field: "Night".into()
            }
        );
    }

    #[test]
    fn empty_month_list_allows_everything() {
        assert!(biscuit("").allows_month("March").unwrap());
    }

    #[test]
    fn month_list_entries_are_matched_whole() {
        let record = biscuit("January,June");
        assert!(record.allows_month("June").unwrap());
        assert!(record.allows_month("January").unwrap());
        assert!(!record.allows_month("Jun").unwrap());
        assert!(!record.allows_month("July").unwrap());
    }

    #[test]
    fn month_list_tolerates_spaces_after_commas() {
        let record = biscuit("November, December");
        assert!(record.allows_month("December").unwrap());
    }

    #[test]
    fn passthrough_columns() {
        let record = biscuit("");
        assert_eq!(record.item().unwrap(), "Tea Biscuit");
        assert_eq!(record.other_restrictions().unwrap(), "Only with tea");
        assert_eq!(record.row(), 2);
        assert!(record.get("Colour").is_none());
    }

    #[test]
    fn item_label_keys() {
        assert_eq!(ItemLabel::Snack.plural(), "snacks");
        assert_eq!(ItemLabel::Biscuit.singular(), "biscuit");
        assert_eq!(ItemLabel::default(), ItemLabel::Snack);
    }

    #[test]
    fn item_label_deserializes_lowercase() {
        let label: ItemLabel = serde_json::from_str("\"biscuit\"").unwrap();
        assert_eq!(label, ItemLabel::Biscuit);
    }
}
