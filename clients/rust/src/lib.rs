mod attendance;
mod base;
mod enrollment;
mod reminder;
mod reminder_config;
mod session;
mod status;
mod user;

use attendance::AttendanceClient;
pub use attendance::{CheckinAttendanceInput, ReviewAttendanceInput, UploadAttendanceInput};
pub use base::{APIError, APIErrorVariant, APIResponse};
use base::BaseClient;
use enrollment::EnrollmentClient;
pub use enrollment::CreateEnrollmentInput;
use reminder::ReminderClient;
pub use reminder::TriggerSessionRemindersInput;
use reminder_config::ReminderConfigClient;
pub use reminder_config::{CreateReminderConfigInput, UpdateReminderConfigInput};
use session::SessionClient;
pub use session::{CreateSessionInput, UpdateSessionInput, UpdateSessionSettingsInput};
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;
pub use user::{CreateUserInput, UpdateUserInput};

pub use attenda_api_structs::dtos::*;
pub use attenda_domain::{
    AttendanceSource, AttendanceStatus, EnrollmentStatus, NotificationPreferences,
    SessionSettings, ID,
};

// Domain
pub use attenda_api_structs::dtos::AttendanceDTO as Attendance;
pub use attenda_api_structs::dtos::EnrollmentDTO as Enrollment;
pub use attenda_api_structs::dtos::ReminderConfigDTO as ReminderConfig;
pub use attenda_api_structs::dtos::SessionDTO as Session;
pub use attenda_api_structs::dtos::UserDTO as User;

/// Attenda Server SDK
///
/// The SDK contains methods for interacting with the Attenda server API.
#[derive(Clone)]
pub struct AttendaSDK {
    pub attendance: AttendanceClient,
    pub enrollment: EnrollmentClient,
    pub reminder: ReminderClient,
    pub reminder_config: ReminderConfigClient,
    pub session: SessionClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl AttendaSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let attendance = AttendanceClient::new(base.clone());
        let enrollment = EnrollmentClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let reminder_config = ReminderConfigClient::new(base.clone());
        let session = SessionClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            attendance,
            enrollment,
            reminder,
            reminder_config,
            session,
            status,
            user,
        }
    }
}
