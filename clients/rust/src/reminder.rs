use crate::base::{APIResponse, BaseClient};
use attenda_api_structs::*;
use attenda_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct TriggerSessionRemindersInput {
    pub session_id: ID,
    pub reminder_types: Option<Vec<String>>,
    pub triggered_by: ID,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Runs one reminder sweep over all enabled configurations, exactly as the
    /// background job does on its interval.
    pub async fn sweep(&self) -> APIResponse<sweep_reminders::APIResponse> {
        self.base
            .post((), "reminders/sweep".into(), StatusCode::OK)
            .await
    }

    pub async fn trigger(
        &self,
        input: TriggerSessionRemindersInput,
    ) -> APIResponse<trigger_session_reminders::APIResponse> {
        let body = trigger_session_reminders::RequestBody {
            reminder_types: input.reminder_types,
            triggered_by: input.triggered_by,
        };
        self.base
            .post(
                body,
                format!("sessions/{}/reminders/trigger", input.session_id),
                StatusCode::OK,
            )
            .await
    }
}
