//! Rerun semantics: every run replaces whole relations, never merges.

use integration_tests::{fixtures, setup::TestContext};
use parquet_store::relations;

#[test]
fn test_rerun_replaces_stale_partitions() {
    let ctx = TestContext::new();
    ctx.write_events(
        "events.json",
        &[fixtures::play_event(
            "U1",
            "Song A",
            "Artist X",
            fixtures::TS_2018_11_02,
        )],
    );
    ctx.run().unwrap();
    assert_eq!(
        ctx.partition_dirs(relations::USAGE_FACTS),
        vec!["year=2018/month=11".to_string()]
    );

    // Replace the log with December-only events and rerun: the November
    // partition must be gone, not merged alongside.
    let december = fixtures::TS_2018_11_02 + 35 * 24 * 3600 * 1000;
    ctx.write_events(
        "events.json",
        &[
            fixtures::play_event("U2", "Song B", "Artist Y", december),
            fixtures::play_event("U3", "Song C", "Artist Z", december),
        ],
    );
    ctx.run().unwrap();

    assert_eq!(
        ctx.partition_dirs(relations::USAGE_FACTS),
        vec!["year=2018/month=12".to_string()]
    );
    assert_eq!(ctx.row_count(relations::USAGE_FACTS), 2);
}

#[test]
fn test_rerun_regenerates_fact_ids_from_zero() {
    let ctx = TestContext::new();
    ctx.write_events(
        "events.json",
        &[
            fixtures::play_event("U1", "Song A", "Artist X", fixtures::TS_2018_11_02),
            fixtures::play_event("U2", "Song B", "Artist Y", fixtures::TS_2018_11_02),
            fixtures::play_event("U3", "Song C", "Artist Z", fixtures::TS_2018_11_02),
        ],
    );
    ctx.run().unwrap();

    // Second run over a smaller log: ids restart, they are not continued
    // from the previous run.
    ctx.write_events(
        "events.json",
        &[fixtures::play_event(
            "U9",
            "Song Z",
            "Artist Q",
            fixtures::TS_2018_11_02,
        )],
    );
    ctx.run().unwrap();

    assert_eq!(ctx.i64_column(relations::USAGE_FACTS, "fact_id"), vec![0]);
}

#[test]
fn test_rerun_with_same_inputs_is_idempotent() {
    let ctx = TestContext::new();
    ctx.write_catalog(
        "catalog.json",
        &[fixtures::catalog_record(
            "W1", "Song A", "C1", "Artist X", 2000, 200.0,
        )],
    );
    ctx.write_events(
        "events.json",
        &[fixtures::play_event(
            "U1",
            "Song A",
            "Artist X",
            fixtures::TS_2018_11_02,
        )],
    );

    ctx.run().unwrap();
    let first_facts = ctx.i64_column(relations::USAGE_FACTS, "fact_id");
    let first_dirs = ctx.partition_dirs(relations::USAGE_FACTS);

    ctx.run().unwrap();
    assert_eq!(ctx.i64_column(relations::USAGE_FACTS, "fact_id"), first_facts);
    assert_eq!(ctx.partition_dirs(relations::USAGE_FACTS), first_dirs);
    assert_eq!(ctx.row_count(relations::WORKS), 1);
}
