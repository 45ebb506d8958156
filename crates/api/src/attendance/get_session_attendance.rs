use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::get_session_attendance::*;
use attenda_domain::{SessionAttendance, ID};
use attenda_infra::AttendaContext;

pub async fn get_session_attendance_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = GetSessionAttendanceUseCase {
        session_id: path_params.session_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|attendance| HttpResponse::Ok().json(APIResponse::new(attendance)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct GetSessionAttendanceUseCase {
    pub session_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SessionNotFound(ID),
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SessionNotFound(session_id) => Self::NotFound(format!(
                "The session with id: {}, was not found.",
                session_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSessionAttendanceUseCase {
    type Response = Vec<SessionAttendance>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSessionAttendance";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;

        Ok(ctx.repos.attendance.find_by_session(&self.session_id).await)
    }
}
