//! Usage-event log records and the dimension rows projected from them.

use serde::{Deserialize, Serialize};

/// The event type that marks a consumption event. Only these events feed the
/// `users`, `time`, and `usage_facts` relations.
pub const PLAY_EVENT: &str = "NextSong";

/// A usage event as logged by the application (camelCase wire format).
///
/// One JSON object per user action, including navigation events. Work title
/// and creator name are free-text fields copied from the player state; they
/// are absent on non-playback events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    /// Page/action name, e.g. "NextSong", "Home", "Logout".
    #[serde(rename = "page")]
    pub event_type: String,

    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,

    /// Subscription level at the time of the event ("free" / "paid").
    #[serde(rename = "level")]
    pub subscription_level: String,

    /// Event time, milliseconds since the Unix epoch.
    #[serde(rename = "ts")]
    pub epoch_millis: i64,

    /// Title of the work being played, if any.
    #[serde(rename = "song")]
    pub work_title: Option<String>,

    /// Name of the creator of the work being played, if any.
    #[serde(rename = "artist")]
    pub creator_name: Option<String>,

    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl UsageEvent {
    /// Whether this event is a consumption event (the sole admission
    /// predicate for the event pipeline).
    pub fn is_play(&self) -> bool {
        self.event_type == PLAY_EVENT
    }
}

/// Row of the `users` dimension.
///
/// One row per filtered event, deliberately not deduplicated by user_id: a
/// user whose subscription level changes mid-session keeps one row per
/// occurrence, and downstream consumers may rely on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub subscription_level: String,
}

impl From<&UsageEvent> for UserRow {
    fn from(event: &UsageEvent) -> Self {
        Self {
            user_id: event.user_id.clone(),
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            gender: event.gender.clone(),
            subscription_level: event.subscription_level.clone(),
        }
    }
}
