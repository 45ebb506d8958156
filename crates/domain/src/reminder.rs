use crate::session::Session;
use crate::shared::entity::{Entity, ID};
use crate::timespan::TimeSpan;
use serde::{Deserialize, Serialize};

/// Tolerance applied on both sides of a reminder send window, in millis.
/// The window stays this narrow even when the sweep runs on a wider
/// interval, so a sweep can miss sessions that fall between two runs.
/// Enrollment-time scheduled sends cover that gap.
pub const WINDOW_TOLERANCE_MILLIS: i64 = 2 * 60 * 1000;

const PREFERENCE_KEYS: &[(&str, &str)] = &[
    ("24h", "remind_day_before"),
    ("1h", "remind_hour_before"),
    ("30min", "remind_30_minutes_before"),
    ("15min", "remind_15_minutes_before"),
    ("start", "remind_at_start"),
];

/// Maps a reminder type to the user preference key that can switch it off.
/// Types without a registered key fall back to `reminder_{type}`.
pub fn preference_key_for(reminder_type: &str) -> String {
    PREFERENCE_KEYS
        .iter()
        .find(|(reminder, _)| *reminder == reminder_type)
        .map(|(_, key)| (*key).to_string())
        .unwrap_or_else(|| format!("reminder_{}", reminder_type))
}

#[derive(Debug, Clone)]
pub struct ReminderConfiguration {
    pub id: ID,
    pub reminder_type: String,
    pub minutes_before: i64,
    pub is_enabled: bool,
    pub email_subject_template: String,
    pub display_name: String,
    pub sort_order: i64,
}

impl ReminderConfiguration {
    pub fn is_valid(&self) -> bool {
        !self.reminder_type.is_empty() && self.minutes_before >= 0
    }

    /// The window of session start timestamps this reminder targets when a
    /// sweep runs at `now`.
    pub fn send_window(&self, now: i64) -> TimeSpan {
        let target = now + self.minutes_before * 60 * 1000;
        TimeSpan::new(
            target - WINDOW_TOLERANCE_MILLIS,
            target + WINDOW_TOLERANCE_MILLIS,
        )
    }

    pub fn preference_key(&self) -> String {
        preference_key_for(&self.reminder_type)
    }

    pub fn render_subject(&self, session_title: &str, user_name: &str) -> String {
        self.email_subject_template
            .replace("{session_title}", session_title)
            .replace("{user_name}", user_name)
            .replace("{minutes_before}", &self.minutes_before.to_string())
    }
}

impl Entity for ReminderConfiguration {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// One deferred send persisted at enrollment time. Swept up and deleted in
/// one claim once `send_at` has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledReminder {
    pub id: ID,
    pub session_id: ID,
    pub user_id: ID,
    pub reminder_type: String,
    pub send_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Sent,
    Failed,
    Bounced,
    Retrying,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Bounced => "bounced",
            Self::Retrying => "retrying",
        }
    }

    pub fn from_str(status: &str) -> Self {
        match status {
            "failed" => Self::Failed,
            "bounced" => Self::Bounced,
            "retrying" => Self::Retrying,
            _ => Self::Sent,
        }
    }
}

/// Ledger row recording that a send for `(session_id, user_id,
/// reminder_type)` happened. Any row for the key counts as already sent, a
/// failed row included, so a failed send is never retried by later sweeps.
#[derive(Debug, Clone)]
pub struct SessionReminderEmail {
    pub id: ID,
    pub session_id: ID,
    pub user_id: ID,
    pub reminder_type: String,
    pub sent_at: i64,
    pub email_status: EmailStatus,
    pub provider_message_id: Option<String>,
    pub retry_count: i64,
    pub last_error: Option<String>,
}

impl SessionReminderEmail {
    pub fn sent(
        session_id: ID,
        user_id: ID,
        reminder_type: &str,
        sent_at: i64,
        provider_message_id: Option<String>,
    ) -> Self {
        Self {
            id: Default::default(),
            session_id,
            user_id,
            reminder_type: reminder_type.to_string(),
            sent_at,
            email_status: EmailStatus::Sent,
            provider_message_id,
            retry_count: 0,
            last_error: None,
        }
    }

    pub fn failed(
        session_id: ID,
        user_id: ID,
        reminder_type: &str,
        sent_at: i64,
        error: &str,
    ) -> Self {
        Self {
            id: Default::default(),
            session_id,
            user_id,
            reminder_type: reminder_type.to_string(),
            sent_at,
            email_status: EmailStatus::Failed,
            provider_message_id: None,
            retry_count: 0,
            last_error: Some(error.to_string()),
        }
    }
}

impl Entity for SessionReminderEmail {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Session fields carried into a reminder email payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReminderDetails {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub location: Option<String>,
    pub is_online: bool,
    pub speaker_name: Option<String>,
}

impl From<&Session> for SessionReminderDetails {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            description: session.description.clone(),
            start_ts: session.start_ts,
            end_ts: session.end_ts,
            location: session.location.clone(),
            is_online: session.is_online,
            speaker_name: session.speaker_name.clone(),
        }
    }
}

/// One resolved recipient for one session, ready for dispatch. Built fresh
/// every sweep and never persisted.
#[derive(Debug, Clone)]
pub struct PendingReminder {
    pub session_id: ID,
    pub user_id: ID,
    pub user_email: String,
    pub user_name: String,
    pub session: SessionReminderDetails,
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(minutes_before: i64) -> ReminderConfiguration {
        ReminderConfiguration {
            id: Default::default(),
            reminder_type: "30min".into(),
            minutes_before,
            is_enabled: true,
            email_subject_template: "Starting soon: {session_title}".into(),
            display_name: "30 minutes before".into(),
            sort_order: 3,
        }
    }

    #[test]
    fn send_window_is_four_minutes_wide() {
        let now = 1_000_000_000;
        let window = config(30).send_window(now);
        assert_eq!(window.start(), now + 28 * 60 * 1000);
        assert_eq!(window.end(), now + 32 * 60 * 1000);
    }

    #[test]
    fn send_window_includes_session_29_minutes_away() {
        let now = 1_000_000_000;
        let window = config(30).send_window(now);
        assert!(window.contains(now + 29 * 60 * 1000));
        assert!(window.contains(now + 31 * 60 * 1000));
        assert!(!window.contains(now + 40 * 60 * 1000));
        assert!(!window.contains(now + 27 * 60 * 1000));
    }

    #[test]
    fn preference_keys_for_registered_types() {
        assert_eq!(preference_key_for("24h"), "remind_day_before");
        assert_eq!(preference_key_for("1h"), "remind_hour_before");
        assert_eq!(preference_key_for("30min"), "remind_30_minutes_before");
        assert_eq!(preference_key_for("15min"), "remind_15_minutes_before");
        assert_eq!(preference_key_for("start"), "remind_at_start");
    }

    #[test]
    fn preference_key_falls_back_to_template() {
        assert_eq!(preference_key_for("2h"), "reminder_2h");
    }

    #[test]
    fn renders_subject_placeholders() {
        let mut config = config(30);
        config.email_subject_template =
            "{user_name}, {session_title} starts in {minutes_before} minutes".into();
        assert_eq!(
            config.render_subject("Rust 101", "Ada"),
            "Ada, Rust 101 starts in 30 minutes"
        );
    }

    #[test]
    fn email_status_round_trips_as_str() {
        for status in [
            EmailStatus::Sent,
            EmailStatus::Failed,
            EmailStatus::Bounced,
            EmailStatus::Retrying,
        ] {
            assert_eq!(EmailStatus::from_str(status.as_str()), status);
        }
    }
}
