//! Event pipeline: usage events → `users`, `time`, and `usage_facts`.

use tracing::info;

use mart_core::{CatalogRecord, Result, TimeRow, UsageEvent, UsageFactRow, UserRow};
use parquet_store::{batch, partitioning, relations, ParquetStore};
use telemetry::metrics;

use crate::join::left_join_by;

/// Row counts written by the event pipeline.
#[derive(Debug, Clone)]
pub struct EventsSummary {
    pub events_admitted: usize,
    pub users_rows: usize,
    pub time_rows: usize,
    pub fact_rows: usize,
    pub unmatched_facts: usize,
}

/// Materializes the three event-derived relations.
///
/// `catalog` must be the full, freshly re-read record set, not a collection
/// some earlier stage kept in memory: the join has to see every catalog
/// entry regardless of pipeline ordering.
///
/// The three writes are independent overwrites: a failure producing `time`
/// does not roll back an already-completed `users`.
pub fn run_events_pipeline(
    events: &[UsageEvent],
    catalog: &[CatalogRecord],
    store: &ParquetStore,
) -> Result<EventsSummary> {
    // Sole admission predicate; every relation below derives from this set.
    let plays: Vec<&UsageEvent> = events.iter().filter(|e| e.is_play()).collect();
    metrics().events_admitted.inc_by(plays.len() as u64);

    // Users dimension. One row per admitted event: a level change
    // mid-session stays visible as separate rows.
    let users: Vec<UserRow> = plays.iter().map(|e| UserRow::from(*e)).collect();
    let users_summary = store.replace(
        relations::USERS,
        &batch::users_batch(&users)?,
        partitioning::USERS,
    )?;

    // Time dimension, decomposed per event. Repeated timestamps repeat rows.
    let time_rows: Vec<TimeRow> = plays
        .iter()
        .map(|e| TimeRow::from_epoch_millis(e.epoch_millis))
        .collect::<Result<_>>()?;
    let time_summary = store.replace(
        relations::TIME,
        &batch::time_batch(&time_rows)?,
        partitioning::TIME,
    )?;

    // Fact table: left join on the (title, creator name) pair. Events
    // missing either field keep a row with null catalog columns; duplicate
    // catalog pairs duplicate fact rows.
    let joined = left_join_by(
        &plays,
        catalog,
        |event: &&UsageEvent| {
            match (event.work_title.as_deref(), event.creator_name.as_deref()) {
                (Some(title), Some(creator)) => Some((title, creator)),
                _ => None,
            }
        },
        |record: &CatalogRecord| Some((record.title.as_str(), record.creator_name.as_str())),
    );

    let mut facts = Vec::with_capacity(joined.len());
    let mut unmatched = 0usize;
    for (fact_id, (event, matched)) in joined.into_iter().enumerate() {
        if matched.is_none() {
            unmatched += 1;
        }
        facts.push(UsageFactRow::assemble(fact_id as i64, event, matched)?);
    }
    metrics().facts_assembled.inc_by(facts.len() as u64);
    metrics().facts_unmatched.inc_by(unmatched as u64);

    let facts_summary = store.replace(
        relations::USAGE_FACTS,
        &batch::usage_facts_batch(&facts)?,
        partitioning::USAGE_FACTS,
    )?;

    info!(
        admitted = plays.len(),
        users = users_summary.rows,
        time = time_summary.rows,
        facts = facts_summary.rows,
        unmatched = unmatched,
        "Event pipeline complete"
    );

    Ok(EventsSummary {
        events_admitted: plays.len(),
        users_rows: users_summary.rows,
        time_rows: time_summary.rows,
        fact_rows: facts_summary.rows,
        unmatched_facts: unmatched,
    })
}
