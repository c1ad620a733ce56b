//! Failure behavior: schema errors are fatal before any write.

use std::fs;

use integration_tests::{fixtures, setup::TestContext};
use mart_core::Error;
use parquet_store::relations;
use transform::source;

#[test]
fn test_malformed_event_record_fails_with_location() {
    let ctx = TestContext::new();
    // Second line drops the required ts field.
    fs::write(
        ctx.events_dir.join("events.json"),
        format!(
            "{}\n{{\"page\":\"NextSong\",\"userId\":\"U2\"}}",
            fixtures::play_event("U1", "Song A", "Artist X", fixtures::TS_2018_11_02)
        ),
    )
    .unwrap();

    let err = source::read_events(&ctx.events_dir).unwrap_err();
    match err {
        Error::Schema(msg) => assert!(msg.contains("events.json:2"), "got: {}", msg),
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[test]
fn test_malformed_catalog_record_is_fatal() {
    let ctx = TestContext::new();
    fs::write(
        ctx.catalog_dir.join("catalog.json"),
        r#"{"title":"Song A","creator_id":"C1"}"#,
    )
    .unwrap();

    assert!(matches!(
        source::read_catalog(&ctx.catalog_dir),
        Err(Error::Schema(_))
    ));
}

#[test]
fn test_event_schema_error_prevents_any_event_relation_write() {
    let ctx = TestContext::new();
    ctx.write_catalog(
        "catalog.json",
        &[fixtures::catalog_record(
            "W1", "Song A", "C1", "Artist X", 2000, 200.0,
        )],
    );
    fs::write(ctx.events_dir.join("events.json"), "{\"page\":42}").unwrap();

    // The run fails while scanning the log, after the catalog stage.
    assert!(ctx.run().is_err());

    // Catalog relations completed; no event relation was created. There is
    // no cross-relation rollback.
    assert_eq!(ctx.row_count(relations::WORKS), 1);
    assert!(!ctx.store.relation_dir(relations::USERS).exists());
    assert!(!ctx.store.relation_dir(relations::TIME).exists());
    assert!(!ctx.store.relation_dir(relations::USAGE_FACTS).exists());
}
