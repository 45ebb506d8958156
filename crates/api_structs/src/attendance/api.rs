use crate::dtos::{AttendanceDTO, UploadReport};
use attenda_domain::{SessionAttendance, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub attendance: AttendanceDTO,
}

impl AttendanceResponse {
    pub fn new(attendance: SessionAttendance) -> Self {
        Self {
            attendance: AttendanceDTO::new(attendance),
        }
    }
}

/// The request side is a multipart form with a `file` part and a
/// `sessionId` field, so only the response shape lives here.
pub mod upload_attendance {
    use super::*;

    pub type APIResponse = UploadReport;
}

pub mod get_session_attendance {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub attendance: Vec<AttendanceDTO>,
    }

    impl APIResponse {
        pub fn new(attendance: Vec<SessionAttendance>) -> Self {
            Self {
                attendance: attendance.into_iter().map(AttendanceDTO::new).collect(),
            }
        }
    }
}

pub mod checkin_attendance {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        pub duration_minutes: Option<i64>,
        pub notes: Option<String>,
    }

    pub type APIResponse = AttendanceResponse;
}

pub mod review_attendance {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub attendance_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub approved: bool,
        pub approved_by: ID,
        pub notes: Option<String>,
    }

    pub type APIResponse = AttendanceResponse;
}

pub mod clear_session_attendance {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted_count: i64,
    }
}
