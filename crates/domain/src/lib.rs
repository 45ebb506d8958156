mod attendance;
mod enrollment;
mod reminder;
mod session;
mod shared;
pub mod teams_report;
mod timespan;
mod user;

pub use attendance::{
    match_participant_to_user, required_attendance_minutes, AttendanceSource, AttendanceStatus,
    SessionAttendance,
};
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use reminder::{
    preference_key_for, EmailStatus, PendingReminder, ReminderConfiguration, ScheduledReminder,
    SessionReminderDetails, SessionReminderEmail, WINDOW_TOLERANCE_MILLIS,
};
pub use session::{Session, SessionSettings, DEFAULT_SESSION_DURATION_MINUTES};
pub use shared::entity::{Entity, ID};
pub use timespan::TimeSpan;
pub use user::{NotificationPreferences, User};
