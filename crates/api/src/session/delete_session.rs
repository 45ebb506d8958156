use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::delete_session::*;
use attenda_domain::{Session, ID};
use attenda_infra::AttendaContext;

pub async fn delete_session_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = DeleteSessionUseCase {
        session_id: path_params.session_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|session| HttpResponse::Ok().json(APIResponse::new(session)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct DeleteSessionUseCase {
    pub session_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(session_id) => {
                Self::NotFound(format!("The session with id: {}, was not found.", session_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSessionUseCase {
    type Response = Session;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSession";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let session = ctx
            .repos
            .sessions
            .delete(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.session_id.clone()))?;

        ctx.repos.enrollments.delete_by_session(&session.id).await;
        ctx.repos
            .scheduled_reminders
            .delete_by_session(&session.id)
            .await;
        ctx.repos.attendance.delete_by_session(&session.id).await;

        Ok(session)
    }
}
