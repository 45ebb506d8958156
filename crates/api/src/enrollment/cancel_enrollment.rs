use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::cancel_enrollment::*;
use attenda_domain::{Enrollment, EnrollmentStatus, ID};
use attenda_infra::AttendaContext;

pub async fn cancel_enrollment_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = CancelEnrollmentUseCase {
        session_id: path_params.session_id.clone(),
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|enrollment| HttpResponse::Ok().json(APIResponse::new(enrollment)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct CancelEnrollmentUseCase {
    pub session_id: ID,
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => {
                Self::NotFound("The user is not enrolled in this session.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelEnrollmentUseCase {
    type Response = Enrollment;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelEnrollment";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let mut enrollment = ctx
            .repos
            .enrollments
            .find_by_session_and_user(&self.session_id, &self.user_id)
            .await
            .filter(|enrollment| enrollment.status == EnrollmentStatus::Active)
            .ok_or(UseCaseError::NotFound)?;

        enrollment.status = EnrollmentStatus::Cancelled;
        ctx.repos
            .enrollments
            .save(&enrollment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(enrollment)
    }
}
