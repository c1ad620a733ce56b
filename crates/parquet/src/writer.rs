//! Partitioned Parquet writes with whole-relation overwrite semantics.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, Int32Array, Int64Array, StringArray, UInt32Array};
use arrow::compute;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::debug;

use mart_core::{Error, Result};
use telemetry::metrics;

/// Directory name for rows whose partition value is null.
pub const HIVE_DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

const PART_FILE: &str = "part-00000.parquet";

/// Summary of one relation write.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub relation: String,
    pub rows: usize,
    pub files: usize,
}

/// Parquet store rooted at an output directory.
///
/// The store exposes a single mutation, [`ParquetStore::replace`]: a
/// destructive, idempotent-by-full-replacement write of one relation. There
/// is no upsert and no cross-relation transaction; each call stands alone.
#[derive(Debug, Clone)]
pub struct ParquetStore {
    root: PathBuf,
}

impl ParquetStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one relation's partition tree.
    pub fn relation_dir(&self, relation: &str) -> PathBuf {
        self.root.join(relation)
    }

    /// Replaces a relation's entire partition tree with the given rows.
    ///
    /// Any previous output for the relation is deleted first, including
    /// partitions the new batch does not touch. With an empty `partition_by`
    /// the relation becomes a single file (written even for zero rows, so
    /// empty inputs still produce a readable relation); otherwise rows are
    /// grouped by the rendered partition values into hive-style
    /// `column=value` directories.
    pub fn replace(
        &self,
        relation: &str,
        batch: &RecordBatch,
        partition_by: &[&str],
    ) -> Result<WriteSummary> {
        let schema = batch.schema();
        let mut key_columns = Vec::with_capacity(partition_by.len());
        for col in partition_by {
            let (index, _) = schema.column_with_name(col).ok_or_else(|| {
                Error::schema(format!(
                    "partition column {} not in relation {}",
                    col, relation
                ))
            })?;
            key_columns.push(batch.column(index).clone());
        }

        let start = std::time::Instant::now();

        let dir = self.relation_dir(relation);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;

        let files = if partition_by.is_empty() {
            write_file(&dir.join(PART_FILE), relation, batch)?;
            1
        } else {
            let groups = group_by_partition(relation, batch, partition_by, &key_columns)?;
            let count = groups.len();
            for (subdir, indices) in groups {
                let part_dir = dir.join(subdir);
                fs::create_dir_all(&part_dir)?;
                let part = take_rows(relation, batch, &indices)?;
                write_file(&part_dir.join(PART_FILE), relation, &part)?;
            }
            count
        };

        let elapsed = start.elapsed();
        metrics().write_latency_ms.observe(elapsed.as_millis() as u64);
        metrics().relations_written.inc();
        metrics().rows_written.inc_by(batch.num_rows() as u64);
        metrics().files_written.inc_by(files as u64);

        debug!(
            relation = relation,
            rows = batch.num_rows(),
            files = files,
            latency_ms = %elapsed.as_millis(),
            "Replaced relation"
        );

        Ok(WriteSummary {
            relation: relation.to_string(),
            rows: batch.num_rows(),
            files,
        })
    }
}

/// Groups row indices by rendered partition values.
///
/// BTreeMap keeps partition directories in a deterministic order.
fn group_by_partition(
    relation: &str,
    batch: &RecordBatch,
    partition_by: &[&str],
    key_columns: &[ArrayRef],
) -> Result<BTreeMap<PathBuf, Vec<u32>>> {
    let mut groups: BTreeMap<PathBuf, Vec<u32>> = BTreeMap::new();

    for row in 0..batch.num_rows() {
        let mut subdir = PathBuf::new();
        for (col, values) in partition_by.iter().zip(key_columns) {
            let value = render_partition_value(relation, values, row)?;
            subdir.push(format!("{}={}", col, value));
        }
        groups.entry(subdir).or_default().push(row as u32);
    }

    Ok(groups)
}

/// Renders one partition cell as a directory-name component.
fn render_partition_value(relation: &str, column: &ArrayRef, row: usize) -> Result<String> {
    if column.is_null(row) {
        return Ok(HIVE_DEFAULT_PARTITION.to_string());
    }

    let rendered = match column.data_type() {
        DataType::Utf8 => {
            let values = column
                .as_any()
                .downcast_ref::<StringArray>()
                .expect("Utf8 column");
            sanitize(values.value(row))
        }
        DataType::Int32 => {
            let values = column
                .as_any()
                .downcast_ref::<Int32Array>()
                .expect("Int32 column");
            values.value(row).to_string()
        }
        DataType::Int64 => {
            let values = column
                .as_any()
                .downcast_ref::<Int64Array>()
                .expect("Int64 column");
            values.value(row).to_string()
        }
        DataType::UInt32 => {
            let values = column
                .as_any()
                .downcast_ref::<UInt32Array>()
                .expect("UInt32 column");
            values.value(row).to_string()
        }
        other => {
            return Err(Error::schema(format!(
                "unsupported partition column type {} in relation {}",
                other, relation
            )))
        }
    };

    Ok(rendered)
}

/// Replaces path-hostile characters in a partition value.
///
/// Partition identity is directory naming only; the exact value is still in
/// the file payload.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '/' | '\\' | '=' | ':' => '_',
            _ => c,
        })
        .collect()
}

/// Selects a subset of rows from a batch by index.
fn take_rows(relation: &str, batch: &RecordBatch, indices: &[u32]) -> Result<RecordBatch> {
    let indices = UInt32Array::from(indices.to_vec());
    let columns = batch
        .columns()
        .iter()
        .map(|column| compute::take(column.as_ref(), &indices, None))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::storage(format!("partition split for {}: {}", relation, e)))?;

    RecordBatch::try_new(batch.schema(), columns)
        .map_err(|e| Error::storage(format!("partition split for {}: {}", relation, e)))
}

/// Writes one batch to one Parquet file.
fn write_file(path: &Path, relation: &str, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .map_err(|e| Error::storage(format!("open writer for {}: {}", relation, e)))?;
    writer
        .write(batch)
        .map_err(|e| Error::storage(format!("write {}: {}", relation, e)))?;
    writer
        .close()
        .map_err(|e| Error::storage(format!("close {}: {}", relation, e)))?;

    Ok(())
}
