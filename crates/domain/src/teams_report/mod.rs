//! Parsing of Microsoft Teams attendance report exports.
//!
//! A report arrives as a loose grid of cells. The grid is sliced into the
//! meeting info, participants and activities sections by keyword scanning,
//! then each section is extracted with fuzzy column matching. Everything in
//! here is pure and total: bad input degrades to empty output, never to an
//! error.

mod duration;
mod extract;
mod sections;
mod timestamp;

use serde::{Deserialize, Serialize};

pub use duration::{parse_clock_duration, parse_duration_to_minutes};
pub use extract::{
    extract_meeting_info, parse_activity_rows, parse_participant_rows,
    reconcile_activity_duration,
};
pub use sections::{detect_sections, ReportSections};
pub use timestamp::parse_report_timestamp;

/// One row of the participants section, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsParticipant {
    pub name: String,
    pub email: String,
    pub upn: Option<String>,
    pub role: Option<String>,
    pub join_ts: i64,
    pub leave_ts: i64,
    pub duration_minutes: i64,
    pub in_meeting_duration: Option<i64>,
    pub first_join: Option<i64>,
    pub last_leave: Option<i64>,
}

/// Header block facts, every one of them optional in real exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInfo {
    pub title: Option<String>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Joined,
    Left,
}

/// One row of the join/leave activities section.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceActivity {
    pub name: String,
    pub email: String,
    pub action: ActivityAction,
    pub timestamp: i64,
}
