//! Read-back helpers for written relations.
//!
//! Used by tests and post-run verification; the mart's primary consumers are
//! external query engines reading the partition tree directly.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use mart_core::{Error, Result};

use crate::writer::ParquetStore;

/// Reads every batch of a relation across all of its partition files.
///
/// A relation that was never written reads as empty.
pub fn read_relation(store: &ParquetStore, relation: &str) -> Result<Vec<RecordBatch>> {
    let dir = store.relation_dir(relation);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    collect_parquet_files(&dir, &mut files)?;
    files.sort();

    let mut batches = Vec::new();
    for path in files {
        let file = File::open(&path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(|e| Error::storage(format!("open {}: {}", path.display(), e)))?
            .build()
            .map_err(|e| Error::storage(format!("read {}: {}", path.display(), e)))?;
        for batch in reader {
            batches
                .push(batch.map_err(|e| Error::storage(format!("read {}: {}", path.display(), e)))?);
        }
    }

    Ok(batches)
}

/// Total row count of a relation across all partitions.
pub fn relation_row_count(store: &ParquetStore, relation: &str) -> Result<usize> {
    Ok(read_relation(store, relation)?
        .iter()
        .map(|b| b.num_rows())
        .sum())
}

/// Relative partition directories of a relation that contain data files,
/// sorted (e.g. `["year=2018/month=11"]`). Empty for unpartitioned relations'
/// root-level file.
pub fn partition_dirs(store: &ParquetStore, relation: &str) -> Result<Vec<String>> {
    let root = store.relation_dir(relation);
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    collect_parquet_files(&root, &mut files)?;

    let mut dirs: Vec<String> = files
        .iter()
        .filter_map(|f| f.parent())
        .filter(|p| *p != root)
        .map(|p| {
            p.strip_prefix(&root)
                .expect("partition dir under relation root")
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    dirs.sort();
    dirs.dedup();

    Ok(dirs)
}

fn collect_parquet_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_parquet_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "parquet") {
            out.push(path);
        }
    }
    Ok(())
}
