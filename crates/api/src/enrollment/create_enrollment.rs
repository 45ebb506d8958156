use crate::error::AttendaError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::create_enrollment::*;
use attenda_domain::{Enrollment, EnrollmentStatus, ID};
use attenda_infra::AttendaContext;

use super::subscribers::ScheduleRemindersOnEnrollmentCreated;

pub async fn create_enrollment_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = CreateEnrollmentUseCase {
        session_id: path_params.session_id.clone(),
        user_id: body.0.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|enrollment| HttpResponse::Created().json(APIResponse::new(enrollment)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct CreateEnrollmentUseCase {
    pub session_id: ID,
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SessionNotFound(ID),
    UserNotFound(ID),
    AlreadyEnrolled,
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SessionNotFound(session_id) => Self::NotFound(format!(
                "The session with id: {}, was not found.",
                session_id
            )),
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::AlreadyEnrolled => {
                Self::Conflict("The user is already enrolled in this session.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEnrollmentUseCase {
    type Response = Enrollment;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEnrollment";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;
        ctx.repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        let existing = ctx
            .repos
            .enrollments
            .find_by_session_and_user(&self.session_id, &self.user_id)
            .await;
        if let Some(mut enrollment) = existing {
            if enrollment.status == EnrollmentStatus::Active {
                return Err(UseCaseError::AlreadyEnrolled);
            }
            enrollment.status = EnrollmentStatus::Active;
            ctx.repos
                .enrollments
                .save(&enrollment)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            return Ok(enrollment);
        }

        let enrollment = Enrollment::new(
            self.session_id.clone(),
            self.user_id.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .enrollments
            .insert(&enrollment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(enrollment)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleRemindersOnEnrollmentCreated)]
    }
}
