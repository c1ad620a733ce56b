//! Time-dimension decomposition of event timestamps.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Row of the `time` dimension: the decomposed parts of one event timestamp.
///
/// Every field is a pure function of `timestamp`; one row is emitted per
/// filtered event, so repeated timestamps repeat rows. Partitioned on write
/// by (year, month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRow {
    /// Epoch seconds, after truncating the source's millisecond value.
    pub timestamp: i64,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Day of month, 1-31.
    pub day: u32,
    /// ISO week of year, 1-53.
    pub week: u32,
    /// Month, 1-12.
    pub month: u32,
    pub year: i32,
    /// Day of week, 1 = Sunday through 7 = Saturday.
    pub weekday: u32,
}

impl TimeRow {
    /// Decomposes an epoch-millisecond timestamp.
    ///
    /// Sub-second precision is deliberately discarded: the millisecond value
    /// is integer-divided by 1000 before conversion, so 1541121934796 becomes
    /// 1541121934.
    pub fn from_epoch_millis(epoch_millis: i64) -> Result<Self> {
        let secs = epoch_millis.div_euclid(1000);
        let datetime: DateTime<Utc> = DateTime::from_timestamp(secs, 0)
            .ok_or(Error::InvalidTimestamp(epoch_millis))?;

        Ok(Self {
            timestamp: secs,
            hour: datetime.hour(),
            day: datetime.day(),
            week: datetime.iso_week().week(),
            month: datetime.month(),
            year: datetime.year(),
            weekday: datetime.weekday().number_from_sunday(),
        })
    }
}
