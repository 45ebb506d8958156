use attenda_domain::{NotificationPreferences, User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub email: String,
    pub full_name: String,
    pub preferences: NotificationPreferences,
    pub created: i64,
    pub updated: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email,
            full_name: user.full_name,
            preferences: user.preferences,
            created: user.created,
            updated: user.updated,
        }
    }
}
