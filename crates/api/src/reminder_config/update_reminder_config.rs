use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::update_reminder_config::*;
use attenda_domain::{ReminderConfiguration, ID};
use attenda_infra::AttendaContext;

pub async fn update_reminder_config_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = UpdateReminderConfigUseCase {
        config_id: path_params.config_id.clone(),
        minutes_before: body.minutes_before,
        is_enabled: body.is_enabled,
        email_subject_template: body.email_subject_template,
        display_name: body.display_name,
        sort_order: body.sort_order,
    };

    execute(usecase, &ctx)
        .await
        .map(|config| HttpResponse::Ok().json(APIResponse::new(config)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct UpdateReminderConfigUseCase {
    pub config_id: ID,
    pub minutes_before: Option<i64>,
    pub is_enabled: Option<bool>,
    pub email_subject_template: Option<String>,
    pub display_name: Option<String>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidConfiguration,
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(config_id) => Self::NotFound(format!(
                "The reminder configuration with id: {}, was not found.",
                config_id
            )),
            UseCaseError::InvalidConfiguration => Self::BadClientData(
                "A reminder configuration needs a type and a non-negative lead time.".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderConfigUseCase {
    type Response = ReminderConfiguration;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminderConfig";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let mut config = ctx
            .repos
            .reminder_configs
            .find(&self.config_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.config_id.clone()))?;

        if let Some(minutes_before) = self.minutes_before {
            config.minutes_before = minutes_before;
        }
        if let Some(is_enabled) = self.is_enabled {
            config.is_enabled = is_enabled;
        }
        if let Some(email_subject_template) = self.email_subject_template.take() {
            config.email_subject_template = email_subject_template;
        }
        if let Some(display_name) = self.display_name.take() {
            config.display_name = display_name;
        }
        if let Some(sort_order) = self.sort_order {
            config.sort_order = sort_order;
        }
        if !config.is_valid() {
            return Err(UseCaseError::InvalidConfiguration);
        }

        ctx.repos
            .reminder_configs
            .save(&config)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attenda_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn disables_config_and_rejects_negative_lead_time() {
        let ctx = setup_context().await;
        let config = ReminderConfiguration {
            id: Default::default(),
            reminder_type: "one_hour".into(),
            minutes_before: 60,
            is_enabled: true,
            email_subject_template: "Reminder: {session_title}".into(),
            display_name: "One hour before".into(),
            sort_order: 1,
        };
        ctx.repos
            .reminder_configs
            .insert(&config)
            .await
            .expect("To insert config");

        let mut usecase = UpdateReminderConfigUseCase {
            config_id: config.id.clone(),
            minutes_before: None,
            is_enabled: Some(false),
            email_subject_template: None,
            display_name: None,
            sort_order: None,
        };
        let updated = usecase.execute(&ctx).await.expect("To update config");
        assert!(!updated.is_enabled);
        assert!(ctx.repos.reminder_configs.find_enabled().await.is_empty());

        let mut usecase = UpdateReminderConfigUseCase {
            config_id: config.id.clone(),
            minutes_before: Some(-1),
            is_enabled: None,
            email_subject_template: None,
            display_name: None,
            sort_order: None,
        };
        let err = usecase.execute(&ctx).await.unwrap_err();
        assert_eq!(err, UseCaseError::InvalidConfiguration);
    }
}
