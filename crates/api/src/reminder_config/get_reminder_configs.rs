use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::get_reminder_configs::*;
use attenda_domain::ReminderConfiguration;
use attenda_infra::AttendaContext;

pub async fn get_reminder_configs_controller(
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = GetReminderConfigsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|configs| HttpResponse::Ok().json(APIResponse::new(configs)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct GetReminderConfigsUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {}

impl From<UseCaseError> for AttendaError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderConfigsUseCase {
    type Response = Vec<ReminderConfiguration>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderConfigs";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.reminder_configs.find_all().await)
    }
}
