use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::update_session_settings::*;
use attenda_domain::{SessionSettings, ID};
use attenda_infra::AttendaContext;

pub async fn update_session_settings_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = UpdateSessionSettingsUseCase {
        session_id: path_params.session_id.clone(),
        min_attendance_minutes: body.min_attendance_minutes,
        use_percentage: body.use_percentage,
        attendance_percentage: body.attendance_percentage,
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse { settings }))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct UpdateSessionSettingsUseCase {
    pub session_id: ID,
    pub min_attendance_minutes: Option<i64>,
    pub use_percentage: Option<bool>,
    pub attendance_percentage: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidSettings,
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(session_id) => {
                Self::NotFound(format!("The session with id: {}, was not found.", session_id))
            }
            UseCaseError::InvalidSettings => Self::BadClientData(
                "Attendance settings need a non-negative minimum and a percentage between 1 and 100"
                    .into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSessionSettingsUseCase {
    type Response = SessionSettings;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSessionSettings";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let mut session = ctx
            .repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.session_id.clone()))?;

        let mut settings = session.settings.clone();
        if let Some(min_attendance_minutes) = self.min_attendance_minutes {
            settings.min_attendance_minutes = min_attendance_minutes;
        }
        if let Some(use_percentage) = self.use_percentage {
            settings.use_percentage = use_percentage;
        }
        if let Some(attendance_percentage) = self.attendance_percentage {
            settings.attendance_percentage = attendance_percentage;
        }
        if !settings.is_valid() {
            return Err(UseCaseError::InvalidSettings);
        }

        session.settings = settings.clone();
        session.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .sessions
            .save(&session)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(settings)
    }
}
