//! End-to-end tests for the event pipeline and the fact join.

use integration_tests::{fixtures, setup::TestContext};
use parquet_store::relations;
use serde_json::json;

#[test]
fn test_matched_play_event_end_to_end() {
    let ctx = TestContext::new();
    ctx.write_catalog(
        "catalog.json",
        &[fixtures::catalog_record(
            "W1", "Song A", "C1", "Artist X", 2000, 200.0,
        )],
    );
    ctx.write_events(
        "2018-11-events.json",
        &[fixtures::play_event(
            "U1",
            "Song A",
            "Artist X",
            fixtures::TS_2018_11_02,
        )],
    );

    let (_, summary) = ctx.run().unwrap();

    assert_eq!(summary.events_admitted, 1);
    assert_eq!(summary.fact_rows, 1);
    assert_eq!(summary.unmatched_facts, 0);

    // The join resolved the catalog keys.
    assert_eq!(
        ctx.string_column(relations::USAGE_FACTS, "work_id"),
        vec![Some("W1".to_string())]
    );
    assert_eq!(
        ctx.string_column(relations::USAGE_FACTS, "creator_id"),
        vec![Some("C1".to_string())]
    );

    // Partitioned by the event-side derived year/month.
    assert_eq!(
        ctx.partition_dirs(relations::USAGE_FACTS),
        vec!["year=2018/month=11".to_string()]
    );
    assert_eq!(ctx.i64_column(relations::USAGE_FACTS, "fact_id"), vec![0]);
    assert_eq!(
        ctx.timestamp_seconds(relations::USAGE_FACTS, "start_time"),
        vec![1541121934]
    );
}

#[test]
fn test_unmatched_play_event_keeps_row_with_nulls() {
    let ctx = TestContext::new();
    // Catalog is empty; the event must survive the join anyway.
    ctx.write_events(
        "events.json",
        &[fixtures::play_event(
            "U1",
            "Song A",
            "Artist X",
            fixtures::TS_2018_11_02,
        )],
    );

    let (_, summary) = ctx.run().unwrap();

    assert_eq!(summary.fact_rows, 1);
    assert_eq!(summary.unmatched_facts, 1);
    assert_eq!(
        ctx.string_column(relations::USAGE_FACTS, "work_id"),
        vec![None]
    );
    assert_eq!(
        ctx.string_column(relations::USAGE_FACTS, "creator_id"),
        vec![None]
    );
    // Year/month still derive from the event side.
    assert_eq!(
        ctx.partition_dirs(relations::USAGE_FACTS),
        vec!["year=2018/month=11".to_string()]
    );
}

#[test]
fn test_navigation_only_log_yields_empty_event_relations() {
    let ctx = TestContext::new();
    ctx.write_catalog(
        "catalog.json",
        &[fixtures::catalog_record(
            "W1", "Song A", "C1", "Artist X", 2000, 200.0,
        )],
    );
    ctx.write_events(
        "events.json",
        &[fixtures::navigation_event(
            "U1",
            "PageView",
            fixtures::TS_2018_11_02,
        )],
    );

    let (catalog_summary, summary) = ctx.run().unwrap();

    assert_eq!(summary.events_admitted, 0);
    assert_eq!(ctx.row_count(relations::USERS), 0);
    assert_eq!(ctx.row_count(relations::TIME), 0);
    assert_eq!(ctx.row_count(relations::USAGE_FACTS), 0);

    // Catalog-derived relations are unaffected.
    assert_eq!(catalog_summary.works_rows, 1);
    assert_eq!(ctx.row_count(relations::WORKS), 1);
}

#[test]
fn test_fact_cardinality_matches_admitted_events() {
    let ctx = TestContext::new();
    // One catalog entry; two of three plays will not match.
    ctx.write_catalog(
        "catalog.json",
        &[fixtures::catalog_record(
            "W1", "Song A", "C1", "Artist X", 2000, 200.0,
        )],
    );
    ctx.write_events(
        "events.json",
        &[
            fixtures::play_event("U1", "Song A", "Artist X", fixtures::TS_2018_11_02),
            fixtures::play_event("U2", "Unknown Song", "Artist X", fixtures::TS_2018_11_02),
            fixtures::play_event("U3", "Song A", "Unknown Artist", fixtures::TS_2018_11_02),
            fixtures::navigation_event("U4", "Home", fixtures::TS_2018_11_02),
        ],
    );

    let (_, summary) = ctx.run().unwrap();

    assert_eq!(summary.events_admitted, 3);
    assert_eq!(summary.fact_rows, 3);
    assert_eq!(summary.unmatched_facts, 2);
}

#[test]
fn test_fact_ids_are_pairwise_distinct_across_partitions() {
    let ctx = TestContext::new();
    // Plays spread over two months land in different partitions.
    let december = fixtures::TS_2018_11_02 + 35 * 24 * 3600 * 1000;
    ctx.write_events(
        "events.json",
        &[
            fixtures::play_event("U1", "Song A", "Artist X", fixtures::TS_2018_11_02),
            fixtures::play_event("U2", "Song B", "Artist Y", fixtures::TS_2018_11_02),
            fixtures::play_event("U3", "Song C", "Artist Z", december),
        ],
    );

    let (_, summary) = ctx.run().unwrap();
    assert_eq!(summary.fact_rows, 3);

    let mut ids = ctx.i64_column(relations::USAGE_FACTS, "fact_id");
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_fact_partitions_agree_with_time_dimension() {
    let ctx = TestContext::new();
    let december = fixtures::TS_2018_11_02 + 35 * 24 * 3600 * 1000;
    ctx.write_events(
        "events.json",
        &[
            fixtures::play_event("U1", "Song A", "Artist X", fixtures::TS_2018_11_02),
            fixtures::play_event("U2", "Song B", "Artist Y", december),
        ],
    );

    ctx.run().unwrap();

    // Same partition trees for facts and time.
    assert_eq!(
        ctx.partition_dirs(relations::USAGE_FACTS),
        ctx.partition_dirs(relations::TIME)
    );
    assert_eq!(
        ctx.partition_dirs(relations::TIME),
        vec![
            "year=2018/month=11".to_string(),
            "year=2018/month=12".to_string(),
        ]
    );

    // And row-level year/month values agree.
    let mut fact_ym = ctx.year_month_column(relations::USAGE_FACTS);
    let mut time_ym = ctx.year_month_column(relations::TIME);
    fact_ym.sort_unstable();
    time_ym.sort_unstable();
    assert_eq!(fact_ym, time_ym);
}

#[test]
fn test_user_level_change_keeps_both_rows() {
    let ctx = TestContext::new();
    let mut upgraded = fixtures::play_event("U1", "Song B", "Artist Y", fixtures::TS_2018_11_02);
    upgraded["level"] = json!("paid");
    ctx.write_events(
        "events.json",
        &[
            fixtures::play_event("U1", "Song A", "Artist X", fixtures::TS_2018_11_02),
            upgraded,
        ],
    );

    let (_, summary) = ctx.run().unwrap();

    // No dedup by user_id: the level change stays visible.
    assert_eq!(summary.users_rows, 2);
    let mut levels = ctx.string_column(relations::USERS, "subscription_level");
    levels.sort();
    assert_eq!(
        levels,
        vec![Some("free".to_string()), Some("paid".to_string())]
    );
}
