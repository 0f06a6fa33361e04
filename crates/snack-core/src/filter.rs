//! The "what is acceptable now" rule.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;

use crate::bucket::TimeBucket;
use crate::errors::RecordError;
use crate::record::Record;

/// Result of filtering records against an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptability {
    /// Bucket the instant falls in, if any.
    pub time_bucket: Option<TimeBucket>,
    /// The instant the decision was made for.
    pub now: DateTime<Tz>,
    /// Acceptable records, in source order.
    pub matches: Vec<Record>,
}

impl Acceptability {
    /// English full month name of `now`, as compared against
    /// `Acceptable Months`.
    #[must_use]
    pub fn month_name(&self) -> String {
        month_name(&self.now)
    }
}

fn month_name(now: &DateTime<Tz>) -> String {
    now.format("%B").to_string()
}

/// Select the records acceptable at `now`.
///
/// A record matches when its flag for the current bucket is `"TRUE"` and its
/// month allow-list is empty or names the current month. Hours with no
/// bucket match nothing, and records are not inspected at all in that case.
///
/// # Errors
///
/// Returns [`RecordError::MissingField`] when a record lacks the flag column
/// for the current bucket, or lacks `Acceptable Months` while flagged.
pub fn acceptable_now(records: &[Record], now: DateTime<Tz>) -> Result<Acceptability, RecordError> {
    let time_bucket = TimeBucket::from_hour(now.hour());
    let mut matches = Vec::new();

    if let Some(bucket) = time_bucket {
        let month = month_name(&now);
        for record in records {
            if record.flag(bucket)? && record.allows_month(&month)? {
                matches.push(record.clone());
            }
        }
    }

    Ok(Acceptability {
        time_bucket,
        now,
        matches,
    })
}
