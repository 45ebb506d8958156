use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::delete_reminder_config::*;
use attenda_domain::{ReminderConfiguration, ID};
use attenda_infra::AttendaContext;

pub async fn delete_reminder_config_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = DeleteReminderConfigUseCase {
        config_id: path_params.config_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|config| HttpResponse::Ok().json(APIResponse::new(config)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct DeleteReminderConfigUseCase {
    pub config_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(config_id) => Self::NotFound(format!(
                "The reminder configuration with id: {}, was not found.",
                config_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderConfigUseCase {
    type Response = ReminderConfiguration;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminderConfig";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminder_configs
            .delete(&self.config_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.config_id.clone()))
    }
}
