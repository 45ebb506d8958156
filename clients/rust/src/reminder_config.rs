use crate::base::{APIResponse, BaseClient};
use attenda_api_structs::*;
use attenda_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderConfigClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderConfigInput {
    pub reminder_type: String,
    pub minutes_before: i64,
    pub is_enabled: Option<bool>,
    pub email_subject_template: Option<String>,
    pub display_name: Option<String>,
    pub sort_order: Option<i64>,
}

pub struct UpdateReminderConfigInput {
    pub config_id: ID,
    pub minutes_before: Option<i64>,
    pub is_enabled: Option<bool>,
    pub email_subject_template: Option<String>,
    pub display_name: Option<String>,
    pub sort_order: Option<i64>,
}

impl ReminderConfigClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderConfigInput,
    ) -> APIResponse<create_reminder_config::APIResponse> {
        let body = create_reminder_config::RequestBody {
            reminder_type: input.reminder_type,
            minutes_before: input.minutes_before,
            is_enabled: input.is_enabled,
            email_subject_template: input.email_subject_template,
            display_name: input.display_name,
            sort_order: input.sort_order,
        };
        self.base
            .post(body, "reminders/configs".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_reminder_configs::APIResponse> {
        self.base
            .get("reminders/configs".into(), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderConfigInput,
    ) -> APIResponse<update_reminder_config::APIResponse> {
        let body = update_reminder_config::RequestBody {
            minutes_before: input.minutes_before,
            is_enabled: input.is_enabled,
            email_subject_template: input.email_subject_template,
            display_name: input.display_name,
            sort_order: input.sort_order,
        };
        self.base
            .put(
                body,
                format!("reminders/configs/{}", input.config_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, config_id: ID) -> APIResponse<delete_reminder_config::APIResponse> {
        self.base
            .delete(format!("reminders/configs/{}", config_id), StatusCode::OK)
            .await
    }
}
