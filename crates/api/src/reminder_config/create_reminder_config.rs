use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::create_reminder_config::*;
use attenda_domain::ReminderConfiguration;
use attenda_infra::AttendaContext;

pub async fn create_reminder_config_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = CreateReminderConfigUseCase {
        reminder_type: body.reminder_type,
        minutes_before: body.minutes_before,
        is_enabled: body.is_enabled,
        email_subject_template: body.email_subject_template,
        display_name: body.display_name,
        sort_order: body.sort_order,
    };

    execute(usecase, &ctx)
        .await
        .map(|config| HttpResponse::Created().json(APIResponse::new(config)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct CreateReminderConfigUseCase {
    pub reminder_type: String,
    pub minutes_before: i64,
    pub is_enabled: Option<bool>,
    pub email_subject_template: Option<String>,
    pub display_name: Option<String>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidConfiguration,
    TypeAlreadyExists(String),
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidConfiguration => Self::BadClientData(
                "A reminder configuration needs a type and a non-negative lead time.".into(),
            ),
            UseCaseError::TypeAlreadyExists(reminder_type) => Self::Conflict(format!(
                "A reminder configuration with the type: {}, already exists.",
                reminder_type
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderConfigUseCase {
    type Response = ReminderConfiguration;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminderConfig";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let reminder_type = self.reminder_type.trim().to_string();
        let config = ReminderConfiguration {
            id: Default::default(),
            reminder_type: reminder_type.clone(),
            minutes_before: self.minutes_before,
            is_enabled: self.is_enabled.unwrap_or(true),
            email_subject_template: self
                .email_subject_template
                .take()
                .unwrap_or_else(|| "Reminder: {session_title}".into()),
            display_name: self.display_name.take().unwrap_or_else(|| reminder_type.clone()),
            sort_order: self.sort_order.unwrap_or(0),
        };
        if !config.is_valid() {
            return Err(UseCaseError::InvalidConfiguration);
        }

        if ctx
            .repos
            .reminder_configs
            .find_by_type(&reminder_type)
            .await
            .is_some()
        {
            return Err(UseCaseError::TypeAlreadyExists(reminder_type));
        }

        ctx.repos
            .reminder_configs
            .insert(&config)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(config)
    }
}
