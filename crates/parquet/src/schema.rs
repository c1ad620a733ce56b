//! Arrow schemas for the five output relations.
//!
//! These schemas are the contract for downstream readers of the mart. The
//! partition columns stay in the file payload as well as in the directory
//! names, so every file is self-describing.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};

/// Relation names, used as output directory names under the store root.
pub mod relations {
    pub const WORKS: &str = "works";
    pub const CREATORS: &str = "creators";
    pub const USERS: &str = "users";
    pub const TIME: &str = "time";
    pub const USAGE_FACTS: &str = "usage_facts";

    /// All relations a run materializes, in write order.
    pub const ALL: &[&str] = &[WORKS, CREATORS, USERS, TIME, USAGE_FACTS];
}

/// Partition column lists per relation.
pub mod partitioning {
    pub const WORKS: &[&str] = &["release_year", "creator_id"];
    pub const CREATORS: &[&str] = &[];
    pub const USERS: &[&str] = &[];
    pub const TIME: &[&str] = &["year", "month"];
    pub const USAGE_FACTS: &[&str] = &["year", "month"];
}

/// Schema of the `works` dimension.
pub fn works() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("work_id", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("creator_id", DataType::Utf8, false),
        Field::new("release_year", DataType::Int32, false),
        Field::new("duration", DataType::Float64, false),
    ]))
}

/// Schema of the `creators` dimension.
pub fn creators() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("creator_id", DataType::Utf8, false),
        Field::new("creator_name", DataType::Utf8, false),
        Field::new("creator_location", DataType::Utf8, true),
        Field::new("creator_latitude", DataType::Float64, true),
        Field::new("creator_longitude", DataType::Float64, true),
    ]))
}

/// Schema of the `users` dimension.
pub fn users() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("user_id", DataType::Utf8, false),
        Field::new("first_name", DataType::Utf8, true),
        Field::new("last_name", DataType::Utf8, true),
        Field::new("gender", DataType::Utf8, true),
        Field::new("subscription_level", DataType::Utf8, false),
    ]))
}

/// Schema of the `time` dimension.
pub fn time() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Second, None),
            false,
        ),
        Field::new("hour", DataType::UInt32, false),
        Field::new("day", DataType::UInt32, false),
        Field::new("week", DataType::UInt32, false),
        Field::new("month", DataType::UInt32, false),
        Field::new("year", DataType::Int32, false),
        Field::new("weekday", DataType::UInt32, false),
    ]))
}

/// Schema of the `usage_facts` fact table.
pub fn usage_facts() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("fact_id", DataType::Int64, false),
        Field::new(
            "start_time",
            DataType::Timestamp(TimeUnit::Second, None),
            false,
        ),
        Field::new("user_id", DataType::Utf8, false),
        Field::new("subscription_level", DataType::Utf8, false),
        Field::new("work_id", DataType::Utf8, true),
        Field::new("creator_id", DataType::Utf8, true),
        Field::new("session_id", DataType::Int64, false),
        Field::new("location", DataType::Utf8, true),
        Field::new("user_agent", DataType::Utf8, true),
        Field::new("year", DataType::Int32, false),
        Field::new("month", DataType::UInt32, false),
    ]))
}
