use crate::session::SessionSettings;
use crate::shared::entity::{Entity, ID};
use crate::teams_report::TeamsParticipant;
use crate::user::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceSource {
    TeamsCsv,
    Manual,
}

impl AttendanceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamsCsv => "teams_csv",
            Self::Manual => "manual",
        }
    }

    pub fn from_str(source: &str) -> Self {
        match source {
            "teams_csv" => Self::TeamsCsv,
            _ => Self::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    PendingApproval,
    Approved,
    Rejected,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(status: &str) -> Self {
        match status {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::PendingApproval,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionAttendance {
    pub id: ID,
    pub session_id: ID,
    pub user_id: ID,
    pub check_in_time: i64,
    pub join_time: i64,
    pub leave_time: Option<i64>,
    pub duration_minutes: i64,
    pub is_eligible_for_certificate: bool,
    pub attendance_source: AttendanceSource,
    pub status: AttendanceStatus,
    pub approved_by: Option<ID>,
    pub approved_at: Option<i64>,
    pub notes: Option<String>,
}

impl SessionAttendance {
    pub fn from_report_row(
        session_id: ID,
        user_id: ID,
        join_ts: i64,
        leave_ts: i64,
        duration_minutes: i64,
        is_eligible: bool,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            session_id,
            user_id,
            check_in_time: if join_ts > 0 { join_ts } else { now },
            join_time: if join_ts > 0 { join_ts } else { now },
            leave_time: if leave_ts > 0 { Some(leave_ts) } else { None },
            duration_minutes,
            is_eligible_for_certificate: is_eligible,
            attendance_source: AttendanceSource::TeamsCsv,
            status: AttendanceStatus::PendingApproval,
            approved_by: None,
            approved_at: None,
            notes: None,
        }
    }

    pub fn manual_check_in(session_id: ID, user_id: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            session_id,
            user_id,
            check_in_time: now,
            join_time: now,
            leave_time: None,
            duration_minutes: 0,
            is_eligible_for_certificate: false,
            attendance_source: AttendanceSource::Manual,
            status: AttendanceStatus::PendingApproval,
            approved_by: None,
            approved_at: None,
            notes: None,
        }
    }

    /// Whether a re-uploaded report row may overwrite this record. Manual
    /// records always lose to a report row; a report record only loses to a
    /// strictly longer duration, so a shorter re-upload never regresses it.
    pub fn should_replace_with(&self, new_duration_minutes: i64) -> bool {
        self.attendance_source != AttendanceSource::TeamsCsv
            || new_duration_minutes > self.duration_minutes
    }
}

impl Entity for SessionAttendance {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Minutes a participant must have attended to qualify for a certificate.
/// `report_duration_minutes` is the meeting duration parsed out of the
/// uploaded report, when the report carried one.
pub fn required_attendance_minutes(
    settings: &SessionSettings,
    report_duration_minutes: Option<i64>,
    stored_session_minutes: i64,
) -> i64 {
    if settings.use_percentage {
        let base = report_duration_minutes.unwrap_or(stored_session_minutes);
        std::cmp::max(1, base * settings.attendance_percentage / 100)
    } else {
        settings.min_attendance_minutes
    }
}

fn email_local_part(email: &str) -> Option<String> {
    let local = email.split('@').next().unwrap_or_default().trim();
    if local.is_empty() {
        None
    } else {
        Some(local.to_lowercase())
    }
}

fn name_tokens(name: &str) -> Vec<String> {
    name.split_whitespace()
        .map(|token| token.to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Resolves an uploaded participant to a registered user. Tried in order:
/// exact email, UPN as email, the uploaded local-part contained in a
/// registered email, then full-name token overlap picking the user sharing
/// the most tokens (at least one).
pub fn match_participant_to_user<'a>(
    participant: &TeamsParticipant,
    users: &'a [User],
) -> Option<&'a User> {
    let email = participant.email.trim();
    if !email.is_empty() {
        if let Some(user) = users.iter().find(|u| u.email.eq_ignore_ascii_case(email)) {
            return Some(user);
        }
    }

    if let Some(upn) = participant.upn.as_deref().map(str::trim) {
        if !upn.is_empty() {
            if let Some(user) = users.iter().find(|u| u.email.eq_ignore_ascii_case(upn)) {
                return Some(user);
            }
        }
    }

    if let Some(local) = email_local_part(email) {
        if let Some(user) = users
            .iter()
            .find(|u| u.email.to_lowercase().contains(&local))
        {
            return Some(user);
        }
    }

    let tokens = name_tokens(&participant.name);
    if tokens.is_empty() {
        return None;
    }
    let mut best: Option<(&User, usize)> = None;
    for user in users {
        let user_tokens = name_tokens(&user.full_name);
        let overlap = tokens
            .iter()
            .filter(|token| user_tokens.contains(token))
            .count();
        if overlap > 0 && overlap > best.map(|(_, count)| count).unwrap_or(0) {
            best = Some((user, overlap));
        }
    }
    best.map(|(user, _)| user)
}

#[cfg(test)]
mod test {
    use super::*;

    fn participant(name: &str, email: &str, upn: Option<&str>) -> TeamsParticipant {
        TeamsParticipant {
            name: name.to_string(),
            email: email.to_string(),
            upn: upn.map(|s| s.to_string()),
            role: None,
            join_ts: 0,
            leave_ts: 0,
            duration_minutes: 0,
            in_meeting_duration: None,
            first_join: None,
            last_leave: None,
        }
    }

    fn user(email: &str, full_name: &str) -> User {
        User::new(email, full_name, 0)
    }

    #[test]
    fn required_minutes_fixed_threshold() {
        let settings = SessionSettings {
            min_attendance_minutes: 25,
            use_percentage: false,
            attendance_percentage: 80,
        };
        assert_eq!(required_attendance_minutes(&settings, Some(90), 60), 25);
    }

    #[test]
    fn required_minutes_percentage_of_report_duration() {
        let settings = SessionSettings {
            min_attendance_minutes: 30,
            use_percentage: true,
            attendance_percentage: 50,
        };
        assert_eq!(required_attendance_minutes(&settings, Some(60), 120), 30);
    }

    #[test]
    fn percentage_boundary_at_half_of_sixty() {
        let settings = SessionSettings {
            min_attendance_minutes: 30,
            use_percentage: true,
            attendance_percentage: 50,
        };
        let required = required_attendance_minutes(&settings, Some(60), 60);
        assert_eq!(required, 30);
        assert!(29 < required);
        assert!(30 >= required);
    }

    #[test]
    fn percentage_falls_back_to_stored_duration() {
        let settings = SessionSettings {
            min_attendance_minutes: 30,
            use_percentage: true,
            attendance_percentage: 80,
        };
        assert_eq!(required_attendance_minutes(&settings, None, 90), 72);
        // Stored duration itself defaults to 60 upstream
        assert_eq!(required_attendance_minutes(&settings, None, 60), 48);
    }

    #[test]
    fn required_minutes_never_below_one() {
        let settings = SessionSettings {
            min_attendance_minutes: 30,
            use_percentage: true,
            attendance_percentage: 1,
        };
        assert_eq!(required_attendance_minutes(&settings, Some(30), 60), 1);
    }

    #[test]
    fn report_row_never_replaced_by_shorter_or_equal_report() {
        let existing = SessionAttendance::from_report_row(
            ID::new(),
            ID::new(),
            1_000,
            2_000,
            20,
            false,
            1_000,
        );
        assert!(!existing.should_replace_with(15));
        assert!(!existing.should_replace_with(20));
        assert!(existing.should_replace_with(25));
    }

    #[test]
    fn manual_row_always_replaced_by_report() {
        let existing = SessionAttendance::manual_check_in(ID::new(), ID::new(), 1_000);
        assert!(existing.should_replace_with(0));
    }

    #[test]
    fn matches_exact_email_case_insensitive() {
        let users = vec![user("ada@example.com", "Ada Lovelace")];
        let p = participant("A. Lovelace", "ADA@Example.com", None);
        assert_eq!(
            match_participant_to_user(&p, &users).map(|u| u.email.as_str()),
            Some("ada@example.com")
        );
    }

    #[test]
    fn matches_upn_when_email_unknown() {
        let users = vec![user("grace@example.com", "Grace Hopper")];
        let p = participant("Grace H", "", Some("grace@example.com"));
        assert!(match_participant_to_user(&p, &users).is_some());
    }

    #[test]
    fn matches_local_part_containment() {
        let users = vec![user("alan.turing@example.com", "Alan Turing")];
        let p = participant("Alan", "alan.turing@other-tenant.org", None);
        assert!(match_participant_to_user(&p, &users).is_some());
    }

    #[test]
    fn matches_best_name_token_overlap() {
        let users = vec![
            user("a@example.com", "Ada King"),
            user("b@example.com", "Ada Lovelace King"),
        ];
        let p = participant("Ada Lovelace", "", None);
        assert_eq!(
            match_participant_to_user(&p, &users).map(|u| u.email.as_str()),
            Some("b@example.com")
        );
    }

    #[test]
    fn no_match_returns_none() {
        let users = vec![user("ada@example.com", "Ada Lovelace")];
        let p = participant("Unknown Person", "nobody@nowhere.org", None);
        assert!(match_participant_to_user(&p, &users).is_none());
    }
}
