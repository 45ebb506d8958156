use attenda_domain::{Session, SessionSettings, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub location: Option<String>,
    pub is_online: bool,
    pub speaker_name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub settings: SessionSettings,
    pub created: i64,
    pub updated: i64,
}

impl SessionDTO {
    pub fn new(session: Session) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title,
            description: session.description,
            start_ts: session.start_ts,
            end_ts: session.end_ts,
            location: session.location,
            is_online: session.is_online,
            speaker_name: session.speaker_name,
            duration_minutes: session.duration_minutes,
            settings: session.settings,
            created: session.created,
            updated: session.updated,
        }
    }
}
