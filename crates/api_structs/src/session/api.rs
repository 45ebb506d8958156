use crate::dtos::SessionDTO;
use attenda_domain::{Session, SessionSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: SessionDTO,
}

impl SessionResponse {
    pub fn new(session: Session) -> Self {
        Self {
            session: SessionDTO::new(session),
        }
    }
}

pub mod create_session {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
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

    pub type APIResponse = SessionResponse;
}

pub mod get_session {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    pub type APIResponse = SessionResponse;
}

pub mod update_session {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: Option<String>,
        pub description: Option<String>,
        pub start_ts: Option<i64>,
        pub end_ts: Option<i64>,
        pub location: Option<String>,
        pub is_online: Option<bool>,
        pub speaker_name: Option<String>,
        pub duration_minutes: Option<i64>,
    }

    pub type APIResponse = SessionResponse;
}

pub mod delete_session {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    pub type APIResponse = SessionResponse;
}

pub mod get_session_settings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub settings: SessionSettings,
    }
}

pub mod update_session_settings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub min_attendance_minutes: Option<i64>,
        pub use_percentage: Option<bool>,
        pub attendance_percentage: Option<i64>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub settings: SessionSettings,
    }
}
