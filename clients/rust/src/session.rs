use crate::base::{APIResponse, BaseClient};
use attenda_api_structs::*;
use attenda_domain::{SessionSettings, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionClient {
    base: Arc<BaseClient>,
}

pub struct CreateSessionInput {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub location: Option<String>,
    pub is_online: Option<bool>,
    pub speaker_name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub settings: Option<SessionSettings>,
}

pub struct UpdateSessionInput {
    pub session_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub location: Option<String>,
    pub is_online: Option<bool>,
    pub speaker_name: Option<String>,
    pub duration_minutes: Option<i64>,
}

pub struct UpdateSessionSettingsInput {
    pub session_id: ID,
    pub min_attendance_minutes: Option<i64>,
    pub use_percentage: Option<bool>,
    pub attendance_percentage: Option<i64>,
}

impl SessionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateSessionInput,
    ) -> APIResponse<create_session::APIResponse> {
        let body = create_session::RequestBody {
            title: input.title,
            description: input.description,
            start_ts: input.start_ts,
            end_ts: input.end_ts,
            location: input.location,
            is_online: input.is_online,
            speaker_name: input.speaker_name,
            duration_minutes: input.duration_minutes,
            settings: input.settings,
        };
        self.base
            .post(body, "sessions".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, session_id: ID) -> APIResponse<get_session::APIResponse> {
        self.base
            .get(format!("sessions/{}", session_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateSessionInput,
    ) -> APIResponse<update_session::APIResponse> {
        let body = update_session::RequestBody {
            title: input.title,
            description: input.description,
            start_ts: input.start_ts,
            end_ts: input.end_ts,
            location: input.location,
            is_online: input.is_online,
            speaker_name: input.speaker_name,
            duration_minutes: input.duration_minutes,
        };
        self.base
            .put(
                body,
                format!("sessions/{}", input.session_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, session_id: ID) -> APIResponse<delete_session::APIResponse> {
        self.base
            .delete(format!("sessions/{}", session_id), StatusCode::OK)
            .await
    }

    pub async fn get_settings(
        &self,
        session_id: ID,
    ) -> APIResponse<get_session_settings::APIResponse> {
        self.base
            .get(format!("sessions/{}/settings", session_id), StatusCode::OK)
            .await
    }

    pub async fn update_settings(
        &self,
        input: UpdateSessionSettingsInput,
    ) -> APIResponse<update_session_settings::APIResponse> {
        let body = update_session_settings::RequestBody {
            min_attendance_minutes: input.min_attendance_minutes,
            use_percentage: input.use_percentage,
            attendance_percentage: input.attendance_percentage,
        };
        self.base
            .put(
                body,
                format!("sessions/{}/settings", input.session_id),
                StatusCode::OK,
            )
            .await
    }
}
