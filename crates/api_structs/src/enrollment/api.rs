use crate::dtos::EnrollmentDTO;
use attenda_domain::{Enrollment, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub enrollment: EnrollmentDTO,
}

impl EnrollmentResponse {
    pub fn new(enrollment: Enrollment) -> Self {
        Self {
            enrollment: EnrollmentDTO::new(enrollment),
        }
    }
}

pub mod create_enrollment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
    }

    pub type APIResponse = EnrollmentResponse;
}

pub mod cancel_enrollment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
        pub user_id: ID,
    }

    pub type APIResponse = EnrollmentResponse;
}

pub mod get_session_enrollments {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub session_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub enrollments: Vec<EnrollmentDTO>,
    }

    impl APIResponse {
        pub fn new(enrollments: Vec<Enrollment>) -> Self {
            Self {
                enrollments: enrollments.into_iter().map(EnrollmentDTO::new).collect(),
            }
        }
    }
}
