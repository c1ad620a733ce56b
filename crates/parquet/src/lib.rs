//! Partitioned Parquet sink for the mart builder.
//!
//! Every output relation is materialized through [`ParquetStore::replace`]:
//! a whole-relation overwrite that deletes the previous partition tree and
//! writes hive-style `column=value` directories from scratch.

pub mod batch;
pub mod reader;
pub mod schema;
pub mod writer;

pub use batch::*;
pub use reader::{partition_dirs, read_relation, relation_row_count};
pub use schema::{partitioning, relations};
pub use writer::{ParquetStore, WriteSummary, HIVE_DEFAULT_PARTITION};
