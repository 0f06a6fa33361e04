//! # snack-core
//!
//! Core types and the availability filter for Snackbot.
//!
//! This crate has no I/O. It provides:
//! - [`Record`], one spreadsheet row keyed by header name
//! - [`TimeBucket`] and the hour-to-bucket table
//! - [`acceptable_now`], the filter deciding which records are acceptable
//! - [`Clock`] for injecting the current instant
//! - The fixed reference time zone used by every computation

pub mod bucket;
pub mod clock;
pub mod errors;
pub mod filter;
pub mod record;

pub use bucket::TimeBucket;
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::RecordError;
pub use filter::{Acceptability, acceptable_now};
pub use record::{ItemLabel, Record};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// The single time zone all bucket and month decisions are made in.
pub const REFERENCE_TZ: Tz = chrono_tz::Europe::London;

/// Convert an instant into the reference time zone.
#[must_use]
pub fn now_in_reference_zone(instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&REFERENCE_TZ)
}
