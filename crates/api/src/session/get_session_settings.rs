use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::get_session_settings::*;
use attenda_domain::{SessionSettings, ID};
use attenda_infra::AttendaContext;

pub async fn get_session_settings_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = GetSessionSettingsUseCase {
        session_id: path_params.session_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse { settings }))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct GetSessionSettingsUseCase {
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
impl UseCase for GetSessionSettingsUseCase {
    type Response = SessionSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSessionSettings";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .sessions
            .find(&self.session_id)
            .await
            .map(|session| session.settings)
            .ok_or_else(|| UseCaseError::NotFound(self.session_id.clone()))
    }
}
