use crate::dtos::{SweepSummary, TriggerSummary};
use attenda_domain::ID;
use serde::{Deserialize, Serialize};

pub mod sweep_reminders {
    use super::*;

    pub type APIResponse = SweepSummary;
}

pub mod trigger_session_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_types: Option<Vec<String>>,
        pub triggered_by: ID,
    }

    pub type APIResponse = TriggerSummary;
}
