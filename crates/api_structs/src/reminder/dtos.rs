use attenda_domain::ID;
use serde::{Deserialize, Serialize};

/// One reminder that could not be delivered, with the last error seen.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FailedReminder {
    pub user_id: ID,
    pub email: String,
    pub error: String,
}

/// Outcome of pushing one set of reminders through the batch dispatcher.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
    pub total_batches: usize,
    pub failed_reminders: Vec<FailedReminder>,
}

/// Per-configuration slice of a sweep or a manual trigger.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSweepResult {
    pub reminder_type: String,
    pub pending: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Aggregate outcome of one sweep over every enabled configuration.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SweepSummary {
    pub processed: usize,
    pub total_reminders: usize,
    pub total_failed: usize,
    pub results: Vec<ConfigSweepResult>,
}

/// Aggregate outcome of a manual trigger for one session.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSummary {
    pub total_sent: usize,
    pub total_failed: usize,
    pub results: Vec<ConfigSweepResult>,
}
