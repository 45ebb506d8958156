use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub full_name: String,
    pub preferences: NotificationPreferences,
    pub created: i64,
    pub updated: i64,
}

/// Per-user notification switches. `session_reminders` is the master toggle,
/// `disabled_keys` opts the user out of individual reminder kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub session_reminders: bool,
    pub disabled_keys: Vec<String>,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            session_reminders: true,
            disabled_keys: Vec::new(),
        }
    }
}

impl NotificationPreferences {
    pub fn allows(&self, preference_key: &str) -> bool {
        self.session_reminders && !self.disabled_keys.iter().any(|key| key == preference_key)
    }

    pub fn disable(&mut self, preference_key: &str) {
        if !self.disabled_keys.iter().any(|key| key == preference_key) {
            self.disabled_keys.push(preference_key.to_string());
        }
    }

    pub fn enable(&mut self, preference_key: &str) {
        self.disabled_keys.retain(|key| key != preference_key);
    }
}

impl User {
    pub fn new(email: &str, full_name: &str, now: i64) -> Self {
        Self {
            id: Default::default(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            preferences: Default::default(),
            created: now,
            updated: now,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
