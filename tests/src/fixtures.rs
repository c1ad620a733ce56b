//! Test fixtures: raw NDJSON records in the source wire formats.

use serde_json::{json, Value};

/// Epoch milliseconds used across the scenarios:
/// 2018-11-02 01:25:34 UTC, a Friday in week 44.
pub const TS_2018_11_02: i64 = 1541121934796;

/// Generate a catalog record (snake_case wire format).
pub fn catalog_record(
    work_id: &str,
    title: &str,
    creator_id: &str,
    creator_name: &str,
    release_year: i32,
    duration: f64,
) -> Value {
    json!({
        "work_id": work_id,
        "title": title,
        "creator_id": creator_id,
        "creator_name": creator_name,
        "creator_location": null,
        "creator_latitude": null,
        "creator_longitude": null,
        "release_year": release_year,
        "duration": duration,
    })
}

/// Generate a playback event (camelCase wire format).
pub fn play_event(user_id: &str, song: &str, artist: &str, ts: i64) -> Value {
    json!({
        "page": "NextSong",
        "userId": user_id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "gender": "F",
        "level": "free",
        "ts": ts,
        "song": song,
        "artist": artist,
        "sessionId": 100,
        "location": "London",
        "userAgent": "Mozilla/5.0 (Test)",
    })
}

/// Generate a navigation event of the given page (never admitted).
pub fn navigation_event(user_id: &str, page: &str, ts: i64) -> Value {
    json!({
        "page": page,
        "userId": user_id,
        "firstName": null,
        "lastName": null,
        "gender": null,
        "level": "free",
        "ts": ts,
        "song": null,
        "artist": null,
        "sessionId": 100,
        "location": null,
        "userAgent": null,
    })
}

/// Render records as one NDJSON document.
pub fn ndjson(records: &[Value]) -> String {
    records
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
