use super::duration::{parse_clock_duration, parse_duration_to_minutes};
use super::sections::ReportSections;
use super::timestamp::parse_report_timestamp;
use super::{ActivityAction, AttendanceActivity, MeetingInfo, TeamsParticipant};
use itertools::Itertools;

fn cell(row: &[String], col: Option<usize>) -> String {
    col.and_then(|idx| row.get(idx))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn first_value_cell(row: &[String]) -> String {
    row.iter()
        .skip(1)
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Position of the first header cell containing every needle.
fn find_col(header: &[String], needles: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let cell = cell.to_lowercase();
        needles.iter().all(|needle| cell.contains(needle))
    })
}

fn parse_duration_cell(raw: &str) -> Option<i64> {
    if raw.contains(':') {
        parse_clock_duration(raw)
    } else {
        parse_duration_to_minutes(raw)
    }
}

/// Pulls title, start, end and duration out of the meeting info block.
/// Duration hunts in three passes: the labeled row in the section, then any
/// "meeting duration" row anywhere in the raw grid, then end minus start.
pub fn extract_meeting_info(sections: &ReportSections, grid: &[Vec<String>]) -> MeetingInfo {
    let mut info = MeetingInfo::default();

    for row in &sections.meeting_info {
        let label = cell(row, Some(0)).to_lowercase();
        let value = first_value_cell(row);
        if value.is_empty() {
            continue;
        }
        if label.contains("meeting") && label.contains("title") {
            info.title = Some(value);
        } else if label.contains("start time") {
            let ts = parse_report_timestamp(&value);
            if ts > 0 {
                info.start_ts = Some(ts);
            }
        } else if label.contains("end time") {
            let ts = parse_report_timestamp(&value);
            if ts > 0 {
                info.end_ts = Some(ts);
            }
        } else if label == "meeting duration" {
            info.duration_minutes = parse_duration_to_minutes(&value);
        }
    }

    if info.duration_minutes.is_none() {
        info.duration_minutes = grid
            .iter()
            .find(|row| cell(row, Some(0)).to_lowercase().contains("meeting duration"))
            .and_then(|row| parse_duration_to_minutes(&first_value_cell(row)));
    }

    if info.duration_minutes.is_none() {
        if let (Some(start), Some(end)) = (info.start_ts, info.end_ts) {
            if end > start {
                info.duration_minutes = Some((end - start + 30_000) / 60_000);
            }
        }
    }

    info
}

/// Normalizes the participants section into rows. Columns are located by
/// fuzzy header substring match, so "Join time", "First Join" and friends
/// all resolve. Rows without a name, or with neither email nor UPN, are
/// dropped. The newer first-join/last-leave columns win over plain
/// join/leave when an export carries both.
pub fn parse_participant_rows(section: &[Vec<String>]) -> Vec<TeamsParticipant> {
    let Some((header, rows)) = section.split_first() else {
        return Vec::new();
    };

    let name_col = find_col(header, &["name"]).or(Some(0));
    let email_col = find_col(header, &["email"]);
    let upn_col = find_col(header, &["participant id"]).or_else(|| find_col(header, &["upn"]));
    let join_col = find_col(header, &["join", "time"]);
    let leave_col = find_col(header, &["leave", "time"]);
    let first_join_col = find_col(header, &["first", "join"]);
    let last_leave_col = find_col(header, &["last", "leave"]);
    let duration_col = find_col(header, &["duration"]);
    let in_meeting_col = find_col(header, &["in-meeting", "duration"]);
    let role_col = find_col(header, &["role"]);

    let mut participants = Vec::new();
    for row in rows {
        let name = cell(row, name_col);
        let mut email = cell(row, email_col);
        let upn = Some(cell(row, upn_col)).filter(|value| !value.is_empty());
        if name.is_empty() || (email.is_empty() && upn.is_none()) {
            continue;
        }
        if email.is_empty() {
            email = upn.clone().unwrap_or_default();
        }

        let first_join = Some(cell(row, first_join_col))
            .filter(|value| !value.is_empty())
            .map(|value| parse_report_timestamp(&value));
        let last_leave = Some(cell(row, last_leave_col))
            .filter(|value| !value.is_empty())
            .map(|value| parse_report_timestamp(&value));
        let join_ts = first_join.unwrap_or_else(|| parse_report_timestamp(&cell(row, join_col)));
        let leave_ts = last_leave.unwrap_or_else(|| parse_report_timestamp(&cell(row, leave_col)));

        let in_meeting_duration = Some(cell(row, in_meeting_col))
            .filter(|value| !value.is_empty())
            .and_then(|value| parse_duration_cell(&value));
        let duration_minutes = parse_duration_cell(&cell(row, duration_col))
            .or(in_meeting_duration)
            .unwrap_or_else(|| {
                if leave_ts > join_ts && join_ts > 0 {
                    (leave_ts - join_ts + 30_000) / 60_000
                } else {
                    0
                }
            });

        participants.push(TeamsParticipant {
            name,
            email,
            upn,
            role: Some(cell(row, role_col)).filter(|value| !value.is_empty()),
            join_ts,
            leave_ts,
            duration_minutes,
            in_meeting_duration,
            first_join,
            last_leave,
        });
    }
    participants
}

/// Parses the activities section into strict joined/left events. Any row
/// with an unknown action or a missing field is discarded.
pub fn parse_activity_rows(section: &[Vec<String>]) -> Vec<AttendanceActivity> {
    let Some((header, rows)) = section.split_first() else {
        return Vec::new();
    };

    let name_col = find_col(header, &["name"]).or(Some(0));
    let email_col = find_col(header, &["email"]);
    let action_col = find_col(header, &["action"]);
    let timestamp_col = find_col(header, &["timestamp"]).or_else(|| find_col(header, &["time"]));
    let (Some(action_col), Some(timestamp_col)) = (action_col, timestamp_col) else {
        return Vec::new();
    };

    let mut activities = Vec::new();
    for row in rows {
        let action = match cell(row, Some(action_col)).to_lowercase().as_str() {
            "joined" => ActivityAction::Joined,
            "left" => ActivityAction::Left,
            _ => continue,
        };
        let name = cell(row, name_col);
        let email = cell(row, email_col);
        let timestamp = parse_report_timestamp(&cell(row, Some(timestamp_col)));
        if name.is_empty() || email.is_empty() || timestamp == 0 {
            continue;
        }
        activities.push(AttendanceActivity {
            name,
            email,
            action,
            timestamp,
        });
    }
    activities
}

/// Total attended minutes for one participant's activity events. Events are
/// replayed in timestamp order, each joined opens a span the next left
/// closes. A trailing joined with no matching left is ignored.
pub fn reconcile_activity_duration(activities: &[AttendanceActivity]) -> i64 {
    let mut open_since: Option<i64> = None;
    let mut total_millis = 0;
    for activity in activities
        .iter()
        .sorted_by_key(|activity| activity.timestamp)
    {
        match activity.action {
            ActivityAction::Joined => {
                if open_since.is_none() {
                    open_since = Some(activity.timestamp);
                }
            }
            ActivityAction::Left => {
                if let Some(joined_at) = open_since.take() {
                    total_millis += (activity.timestamp - joined_at).max(0);
                }
            }
        }
    }
    (total_millis + 30_000) / 60_000
}

#[cfg(test)]
mod test {
    use super::super::detect_sections;
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn report_grid() -> Vec<Vec<String>> {
        vec![
            row(&["1. Summary"]),
            row(&["Meeting title", "Advanced Rust"]),
            row(&["Start time", "5/15/2023, 10:00:00 AM"]),
            row(&["End time", "5/15/2023, 11:30:00 AM"]),
            row(&["Meeting duration", "1h 23m"]),
            row(&["2. Participants"]),
            row(&["Name", "First Join", "Last Leave", "In-Meeting Duration", "Email", "Participant ID (UPN)", "Role"]),
            row(&["Ada Lovelace", "5/15/2023, 10:00:00 AM", "5/15/2023, 10:45:00 AM", "45m 7s", "ada@example.com", "ada@example.com", "Presenter"]),
            row(&["Grace Hopper", "5/15/2023, 10:05:00 AM", "5/15/2023, 11:20:00 AM", "1:15:45", "", "grace@example.com", "Attendee"]),
            row(&["", "", "", "", "", "", ""]),
        ]
    }

    #[test]
    fn extracts_meeting_info_from_labeled_rows() {
        let grid = report_grid();
        let sections = detect_sections(&grid);
        let info = extract_meeting_info(&sections, &grid);
        assert_eq!(info.title.as_deref(), Some("Advanced Rust"));
        assert!(info.start_ts.is_some());
        assert!(info.end_ts.is_some());
        assert_eq!(info.duration_minutes, Some(83));
    }

    #[test]
    fn meeting_duration_found_by_grid_rescan() {
        // Duration row sits after the participants block, outside the
        // detected meeting info section, so only the rescan can find it
        let grid = vec![
            row(&["2. Participants"]),
            row(&["Name", "Email", "Duration"]),
            row(&["Ada Lovelace", "ada@example.com", "45m"]),
            row(&["Meeting duration", "45m 7s"]),
        ];
        let sections = detect_sections(&grid);
        assert!(sections.meeting_info.is_empty());
        let info = extract_meeting_info(&sections, &grid);
        assert_eq!(info.duration_minutes, Some(45));
    }

    #[test]
    fn meeting_duration_computed_from_start_and_end() {
        let grid = vec![
            row(&["1. Summary"]),
            row(&["Start time", "5/15/2023, 10:00:00 AM"]),
            row(&["End time", "5/15/2023, 11:30:00 AM"]),
        ];
        let sections = detect_sections(&grid);
        let info = extract_meeting_info(&sections, &grid);
        assert_eq!(info.duration_minutes, Some(90));
    }

    #[test]
    fn parses_participants_with_fuzzy_columns() {
        let grid = report_grid();
        let sections = detect_sections(&grid);
        let participants = parse_participant_rows(&sections.participants);
        assert_eq!(participants.len(), 2);

        let ada = &participants[0];
        assert_eq!(ada.name, "Ada Lovelace");
        assert_eq!(ada.email, "ada@example.com");
        assert_eq!(ada.duration_minutes, 45);
        assert_eq!(ada.role.as_deref(), Some("Presenter"));
        assert!(ada.first_join.is_some());

        // Email empty, UPN fills in
        let grace = &participants[1];
        assert_eq!(grace.email, "grace@example.com");
        assert_eq!(grace.duration_minutes, 76);
    }

    #[test]
    fn participant_duration_computed_from_join_and_leave() {
        let section = vec![
            row(&["Name", "Join time", "Leave time", "Email"]),
            row(&["Ada Lovelace", "5/15/2023, 10:00:00 AM", "5/15/2023, 10:40:00 AM", "ada@example.com"]),
        ];
        let participants = parse_participant_rows(&section);
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].duration_minutes, 40);
    }

    #[test]
    fn rows_without_identity_are_dropped() {
        let section = vec![
            row(&["Name", "Email", "Duration"]),
            row(&["", "ada@example.com", "45m"]),
            row(&["No Email Person", "", "45m"]),
            row(&["Ada Lovelace", "ada@example.com", "45m"]),
        ];
        let participants = parse_participant_rows(&section);
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name, "Ada Lovelace");
    }

    #[test]
    fn parses_strict_activity_rows() {
        let section = vec![
            row(&["Name", "Action", "Timestamp", "Email"]),
            row(&["Ada Lovelace", "Joined", "5/15/2023, 10:00:00 AM", "ada@example.com"]),
            row(&["Ada Lovelace", "Left", "5/15/2023, 10:20:00 AM", "ada@example.com"]),
            row(&["Ada Lovelace", "Waved", "5/15/2023, 10:21:00 AM", "ada@example.com"]),
            row(&["Ada Lovelace", "Joined", "", "ada@example.com"]),
        ];
        let activities = parse_activity_rows(&section);
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].action, ActivityAction::Joined);
        assert_eq!(activities[1].action, ActivityAction::Left);
    }

    #[test]
    fn reconciles_join_leave_spans() {
        let base = parse_report_timestamp("5/15/2023, 10:00:00 AM");
        let activity = |action, offset_minutes: i64| AttendanceActivity {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            action,
            timestamp: base + offset_minutes * 60_000,
        };
        let events = vec![
            activity(ActivityAction::Joined, 0),
            activity(ActivityAction::Left, 20),
            activity(ActivityAction::Joined, 30),
            activity(ActivityAction::Left, 45),
        ];
        assert_eq!(reconcile_activity_duration(&events), 35);
    }

    #[test]
    fn trailing_joined_without_left_is_ignored() {
        let base = parse_report_timestamp("5/15/2023, 10:00:00 AM");
        let activity = |action, offset_minutes: i64| AttendanceActivity {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            action,
            timestamp: base + offset_minutes * 60_000,
        };
        let events = vec![
            activity(ActivityAction::Joined, 0),
            activity(ActivityAction::Left, 10),
            activity(ActivityAction::Joined, 15),
        ];
        assert_eq!(reconcile_activity_duration(&events), 10);
    }

    #[test]
    fn unsorted_events_are_replayed_in_time_order() {
        let base = parse_report_timestamp("5/15/2023, 10:00:00 AM");
        let activity = |action, offset_minutes: i64| AttendanceActivity {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            action,
            timestamp: base + offset_minutes * 60_000,
        };
        let events = vec![
            activity(ActivityAction::Left, 20),
            activity(ActivityAction::Joined, 0),
        ];
        assert_eq!(reconcile_activity_duration(&events), 20);
    }
}
