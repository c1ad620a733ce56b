//! The `usage_facts` fact table row.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRecord;
use crate::error::Result;
use crate::events::UsageEvent;
use crate::time::TimeRow;

/// Row of the `usage_facts` fact table: one qualifying usage event,
/// left-joined to the catalog.
///
/// `work_id` and `creator_id` are null when the event's (work_title,
/// creator_name) pair matched no catalog record; the row is kept regardless.
/// `year` and `month` are derived from the event timestamp, never from the
/// catalog side, so fact partitions line up with the `time` dimension's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageFactRow {
    /// Surrogate id, unique within one run's output. Ascending under
    /// single-threaded assignment; uniqueness is the only cross-run-safe
    /// assumption. Regenerated from zero by every run's overwrite.
    pub fact_id: i64,
    /// Event time, epoch seconds.
    pub start_time: i64,
    pub user_id: String,
    pub subscription_level: String,
    pub work_id: Option<String>,
    pub creator_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    pub year: i32,
    pub month: u32,
}

impl UsageFactRow {
    /// Assembles a fact row from one joined (event, catalog) pair.
    pub fn assemble(
        fact_id: i64,
        event: &UsageEvent,
        matched: Option<&CatalogRecord>,
    ) -> Result<Self> {
        let time = TimeRow::from_epoch_millis(event.epoch_millis)?;

        Ok(Self {
            fact_id,
            start_time: time.timestamp,
            user_id: event.user_id.clone(),
            subscription_level: event.subscription_level.clone(),
            work_id: matched.map(|r| r.work_id.clone()),
            creator_id: matched.map(|r| r.creator_id.clone()),
            session_id: event.session_id,
            location: event.location.clone(),
            user_agent: event.user_agent.clone(),
            year: time.year,
            month: time.month,
        })
    }
}
