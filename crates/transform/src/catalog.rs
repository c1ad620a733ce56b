//! Catalog pipeline: catalog records → `works` and `creators` dimensions.

use tracing::info;

use mart_core::{CatalogRecord, CreatorRow, Result, WorkRow};
use parquet_store::{batch, partitioning, relations, ParquetStore};

/// Row counts written by the catalog pipeline.
#[derive(Debug, Clone)]
pub struct CatalogSummary {
    pub works_rows: usize,
    pub creators_rows: usize,
}

/// Materializes the two catalog-derived dimensions.
///
/// Both relations are straight projections: no filter, no join, no dedup.
/// Each write replaces the relation's previous partition tree; the two
/// writes are independent, so a failure on `creators` leaves a completed
/// `works` in place.
pub fn run_catalog_pipeline(
    records: &[CatalogRecord],
    store: &ParquetStore,
) -> Result<CatalogSummary> {
    let works: Vec<WorkRow> = records.iter().map(WorkRow::from).collect();
    let works_summary = store.replace(
        relations::WORKS,
        &batch::works_batch(&works)?,
        partitioning::WORKS,
    )?;

    let creators: Vec<CreatorRow> = records.iter().map(CreatorRow::from).collect();
    let creators_summary = store.replace(
        relations::CREATORS,
        &batch::creators_batch(&creators)?,
        partitioning::CREATORS,
    )?;

    info!(
        works = works_summary.rows,
        creators = creators_summary.rows,
        "Catalog pipeline complete"
    );

    Ok(CatalogSummary {
        works_rows: works_summary.rows,
        creators_rows: creators_summary.rows,
    })
}
