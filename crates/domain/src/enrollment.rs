use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Cancelled,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(status: &str) -> Self {
        match status {
            "cancelled" => Self::Cancelled,
            _ => Self::Active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: ID,
    pub session_id: ID,
    pub user_id: ID,
    pub status: EnrollmentStatus,
    pub created: i64,
}

impl Enrollment {
    pub fn new(session_id: ID, user_id: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            session_id,
            user_id,
            status: EnrollmentStatus::Active,
            created: now,
        }
    }
}

impl Entity for Enrollment {
    fn id(&self) -> &ID {
        &self.id
    }
}
