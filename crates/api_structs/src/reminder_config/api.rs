use crate::dtos::ReminderConfigDTO;
use attenda_domain::{ReminderConfiguration, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfigResponse {
    pub config: ReminderConfigDTO,
}

impl ReminderConfigResponse {
    pub fn new(config: ReminderConfiguration) -> Self {
        Self {
            config: ReminderConfigDTO::new(config),
        }
    }
}

pub mod create_reminder_config {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_type: String,
        pub minutes_before: i64,
        pub is_enabled: Option<bool>,
        pub email_subject_template: Option<String>,
        pub display_name: Option<String>,
        pub sort_order: Option<i64>,
    }

    pub type APIResponse = ReminderConfigResponse;
}

pub mod get_reminder_configs {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub configs: Vec<ReminderConfigDTO>,
    }

    impl APIResponse {
        pub fn new(configs: Vec<ReminderConfiguration>) -> Self {
            Self {
                configs: configs.into_iter().map(ReminderConfigDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder_config {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub config_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub minutes_before: Option<i64>,
        pub is_enabled: Option<bool>,
        pub email_subject_template: Option<String>,
        pub display_name: Option<String>,
        pub sort_order: Option<i64>,
    }

    pub type APIResponse = ReminderConfigResponse;
}

pub mod delete_reminder_config {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub config_id: ID,
    }

    pub type APIResponse = ReminderConfigResponse;
}
