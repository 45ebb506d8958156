use crate::base::{APIResponse, BaseClient};
use attenda_api_structs::*;
use attenda_domain::ID;
use reqwest::{multipart, StatusCode};
use std::sync::Arc;

#[derive(Clone)]
pub struct AttendanceClient {
    base: Arc<BaseClient>,
}

pub struct UploadAttendanceInput {
    pub session_id: ID,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

pub struct CheckinAttendanceInput {
    pub session_id: ID,
    pub user_id: ID,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

pub struct ReviewAttendanceInput {
    pub attendance_id: ID,
    pub approved: bool,
    pub approved_by: ID,
    pub notes: Option<String>,
}

impl AttendanceClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Uploads a Teams attendance report export and returns the per-row
    /// parse and match outcome.
    pub async fn upload(
        &self,
        input: UploadAttendanceInput,
    ) -> APIResponse<upload_attendance::APIResponse> {
        let file = multipart::Part::bytes(input.file_bytes).file_name(input.file_name);
        let form = multipart::Form::new()
            .part("file", file)
            .text("sessionId", input.session_id.to_string());
        self.base
            .post_multipart(form, "attendance/upload".into(), StatusCode::OK)
            .await
    }

    pub async fn get_for_session(
        &self,
        session_id: ID,
    ) -> APIResponse<get_session_attendance::APIResponse> {
        self.base
            .get(format!("sessions/{}/attendance", session_id), StatusCode::OK)
            .await
    }

    pub async fn checkin(
        &self,
        input: CheckinAttendanceInput,
    ) -> APIResponse<checkin_attendance::APIResponse> {
        let body = checkin_attendance::RequestBody {
            user_id: input.user_id,
            duration_minutes: input.duration_minutes,
            notes: input.notes,
        };
        self.base
            .post(
                body,
                format!("sessions/{}/attendance/checkin", input.session_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn review(
        &self,
        input: ReviewAttendanceInput,
    ) -> APIResponse<review_attendance::APIResponse> {
        let body = review_attendance::RequestBody {
            approved: input.approved,
            approved_by: input.approved_by,
            notes: input.notes,
        };
        self.base
            .put(
                body,
                format!("attendance/{}/review", input.attendance_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn clear_for_session(
        &self,
        session_id: ID,
    ) -> APIResponse<clear_session_attendance::APIResponse> {
        self.base
            .delete(format!("sessions/{}/attendance", session_id), StatusCode::OK)
            .await
    }
}
