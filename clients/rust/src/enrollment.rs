use crate::base::{APIResponse, BaseClient};
use attenda_api_structs::*;
use attenda_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct EnrollmentClient {
    base: Arc<BaseClient>,
}

pub struct CreateEnrollmentInput {
    pub session_id: ID,
    pub user_id: ID,
}

impl EnrollmentClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateEnrollmentInput,
    ) -> APIResponse<create_enrollment::APIResponse> {
        let body = create_enrollment::RequestBody {
            user_id: input.user_id,
        };
        self.base
            .post(
                body,
                format!("sessions/{}/enrollments", input.session_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get_for_session(
        &self,
        session_id: ID,
    ) -> APIResponse<get_session_enrollments::APIResponse> {
        self.base
            .get(format!("sessions/{}/enrollments", session_id), StatusCode::OK)
            .await
    }

    pub async fn cancel(
        &self,
        session_id: ID,
        user_id: ID,
    ) -> APIResponse<cancel_enrollment::APIResponse> {
        self.base
            .delete(
                format!("sessions/{}/enrollments/{}", session_id, user_id),
                StatusCode::OK,
            )
            .await
    }
}
