//! Row-to-RecordBatch conversion for the output relations.

use std::sync::Arc;

use arrow::array::{
    Float64Array, Int32Array, Int64Array, StringArray, TimestampSecondArray, UInt32Array,
};
use arrow::record_batch::RecordBatch;

use mart_core::{CreatorRow, Error, Result, TimeRow, UsageFactRow, UserRow, WorkRow};

use crate::schema;

fn batch_err(relation: &str, e: arrow::error::ArrowError) -> Error {
    Error::internal(format!("batch assembly for {}: {}", relation, e))
}

/// Builds the `works` relation batch.
pub fn works_batch(rows: &[WorkRow]) -> Result<RecordBatch> {
    RecordBatch::try_new(
        schema::works(),
        vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.work_id.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.title.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.creator_id.as_str()),
            )),
            Arc::new(Int32Array::from_iter_values(
                rows.iter().map(|r| r.release_year),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.duration),
            )),
        ],
    )
    .map_err(|e| batch_err(schema::relations::WORKS, e))
}

/// Builds the `creators` relation batch.
pub fn creators_batch(rows: &[CreatorRow]) -> Result<RecordBatch> {
    RecordBatch::try_new(
        schema::creators(),
        vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.creator_id.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.creator_name.as_str()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.creator_location.as_deref()),
            )),
            Arc::new(Float64Array::from_iter(
                rows.iter().map(|r| r.creator_latitude),
            )),
            Arc::new(Float64Array::from_iter(
                rows.iter().map(|r| r.creator_longitude),
            )),
        ],
    )
    .map_err(|e| batch_err(schema::relations::CREATORS, e))
}

/// Builds the `users` relation batch.
pub fn users_batch(rows: &[UserRow]) -> Result<RecordBatch> {
    RecordBatch::try_new(
        schema::users(),
        vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.user_id.as_str()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.first_name.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.last_name.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.gender.as_deref()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.subscription_level.as_str()),
            )),
        ],
    )
    .map_err(|e| batch_err(schema::relations::USERS, e))
}

/// Builds the `time` relation batch.
pub fn time_batch(rows: &[TimeRow]) -> Result<RecordBatch> {
    RecordBatch::try_new(
        schema::time(),
        vec![
            Arc::new(TimestampSecondArray::from_iter_values(
                rows.iter().map(|r| r.timestamp),
            )),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.hour))),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.day))),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.week))),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.month))),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(UInt32Array::from_iter_values(
                rows.iter().map(|r| r.weekday),
            )),
        ],
    )
    .map_err(|e| batch_err(schema::relations::TIME, e))
}

/// Builds the `usage_facts` relation batch.
pub fn usage_facts_batch(rows: &[UsageFactRow]) -> Result<RecordBatch> {
    RecordBatch::try_new(
        schema::usage_facts(),
        vec![
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| r.fact_id),
            )),
            Arc::new(TimestampSecondArray::from_iter_values(
                rows.iter().map(|r| r.start_time),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.user_id.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.subscription_level.as_str()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.work_id.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.creator_id.as_deref()),
            )),
            Arc::new(Int64Array::from_iter_values(
                rows.iter().map(|r| r.session_id),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.location.as_deref()),
            )),
            Arc::new(StringArray::from_iter(
                rows.iter().map(|r| r.user_agent.as_deref()),
            )),
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.month))),
        ],
    )
    .map_err(|e| batch_err(schema::relations::USAGE_FACTS, e))
}
