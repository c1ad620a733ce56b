//! Transform pipelines for the mart builder.
//!
//! Two pipelines share one store:
//! - Catalog pipeline: catalog records → `works`, `creators`
//! - Event pipeline: usage events (joined to a fresh catalog read) →
//!   `users`, `time`, `usage_facts`

pub mod catalog;
pub mod events;
pub mod join;
pub mod source;

pub use catalog::{run_catalog_pipeline, CatalogSummary};
pub use events::{run_events_pipeline, EventsSummary};
pub use join::left_join_by;
pub use source::{read_catalog, read_events};
