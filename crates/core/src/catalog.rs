//! Catalog metadata records and the dimension rows projected from them.

use serde::{Deserialize, Serialize};

/// A catalog metadata record: one JSON object per creative work, with the
/// creator's attributes denormalized onto it. A creator appearing on many
/// works repeats its attributes on every record; the source enforces no
/// uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub work_id: String,
    pub title: String,
    pub creator_id: String,
    pub creator_name: String,
    pub creator_location: Option<String>,
    pub creator_latitude: Option<f64>,
    pub creator_longitude: Option<f64>,
    pub release_year: i32,
    pub duration: f64,
}

/// Row of the `works` dimension.
///
/// A straight projection of the catalog record; partitioned on write by
/// (release_year, creator_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRow {
    pub work_id: String,
    pub title: String,
    pub creator_id: String,
    pub release_year: i32,
    pub duration: f64,
}

impl From<&CatalogRecord> for WorkRow {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            work_id: record.work_id.clone(),
            title: record.title.clone(),
            creator_id: record.creator_id.clone(),
            release_year: record.release_year,
            duration: record.duration,
        }
    }
}

/// Row of the `creators` dimension.
///
/// One row per catalog record, deliberately not deduplicated by creator_id:
/// the source already repeats identical attributes and downstream consumers
/// are known to tolerate the duplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorRow {
    pub creator_id: String,
    pub creator_name: String,
    pub creator_location: Option<String>,
    pub creator_latitude: Option<f64>,
    pub creator_longitude: Option<f64>,
}

impl From<&CatalogRecord> for CreatorRow {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            creator_id: record.creator_id.clone(),
            creator_name: record.creator_name.clone(),
            creator_location: record.creator_location.clone(),
            creator_latitude: record.creator_latitude,
            creator_longitude: record.creator_longitude,
        }
    }
}
