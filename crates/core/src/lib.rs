//! Core types for the mart builder: input records, star-schema rows, time
//! decomposition, and the unified error type.

pub mod catalog;
pub mod error;
pub mod events;
pub mod facts;
pub mod time;

pub use catalog::{CatalogRecord, CreatorRow, WorkRow};
pub use error::{Error, Result};
pub use events::{UsageEvent, UserRow, PLAY_EVENT};
pub use facts::UsageFactRow;
pub use time::TimeRow;
