use attenda_domain::{Enrollment, EnrollmentStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDTO {
    pub id: ID,
    pub session_id: ID,
    pub user_id: ID,
    pub status: EnrollmentStatus,
    pub created: i64,
}

impl EnrollmentDTO {
    pub fn new(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id.clone(),
            session_id: enrollment.session_id.clone(),
            user_id: enrollment.user_id.clone(),
            status: enrollment.status,
            created: enrollment.created,
        }
    }
}
