use attenda_domain::{ReminderConfiguration, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfigDTO {
    pub id: ID,
    pub reminder_type: String,
    pub minutes_before: i64,
    pub is_enabled: bool,
    pub email_subject_template: String,
    pub display_name: String,
    pub sort_order: i64,
}

impl ReminderConfigDTO {
    pub fn new(config: ReminderConfiguration) -> Self {
        Self {
            id: config.id.clone(),
            reminder_type: config.reminder_type,
            minutes_before: config.minutes_before,
            is_enabled: config.is_enabled,
            email_subject_template: config.email_subject_template,
            display_name: config.display_name,
            sort_order: config.sort_order,
        }
    }
}
