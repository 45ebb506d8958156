use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Fallback duration used when a session has no stored duration and a
/// percentage attendance threshold has to be resolved anyway.
pub const DEFAULT_SESSION_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub location: Option<String>,
    pub is_online: bool,
    pub speaker_name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub settings: SessionSettings,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    pub min_attendance_minutes: i64,
    pub use_percentage: bool,
    pub attendance_percentage: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_attendance_minutes: 30,
            use_percentage: false,
            attendance_percentage: 80,
        }
    }
}

impl SessionSettings {
    pub fn is_valid(&self) -> bool {
        self.min_attendance_minutes >= 0 && (1..=100).contains(&self.attendance_percentage)
    }
}

impl Session {
    pub fn new(title: &str, start_ts: i64, now: i64) -> Self {
        Self {
            id: Default::default(),
            title: title.to_string(),
            description: None,
            start_ts,
            end_ts: None,
            location: None,
            is_online: false,
            speaker_name: None,
            duration_minutes: None,
            settings: Default::default(),
            created: now,
            updated: now,
        }
    }

    pub fn stored_duration_minutes(&self) -> i64 {
        self.duration_minutes
            .unwrap_or(DEFAULT_SESSION_DURATION_MINUTES)
    }
}

impl Entity for Session {
    fn id(&self) -> &ID {
        &self.id
    }
}
