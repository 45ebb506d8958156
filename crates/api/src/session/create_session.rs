use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::create_session::*;
use attenda_domain::{Session, SessionSettings};
use attenda_infra::AttendaContext;

pub async fn create_session_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = CreateSessionUseCase {
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        location: body.location,
        is_online: body.is_online.unwrap_or(false),
        speaker_name: body.speaker_name,
        duration_minutes: body.duration_minutes,
        settings: body.settings,
    };

    execute(usecase, &ctx)
        .await
        .map(|session| HttpResponse::Created().json(APIResponse::new(session)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct CreateSessionUseCase {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub location: Option<String>,
    pub is_online: bool,
    pub speaker_name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub settings: Option<SessionSettings>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    InvalidTimespan,
    InvalidSettings,
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("A session needs a title".into()),
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The session end time has to be after the start time".into())
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
impl UseCase for CreateSessionUseCase {
    type Response = Session;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSession";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        if let Some(end_ts) = self.end_ts {
            if end_ts <= self.start_ts {
                return Err(UseCaseError::InvalidTimespan);
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut session = Session::new(self.title.trim(), self.start_ts, now);
        session.description = self.description.clone();
        session.end_ts = self.end_ts;
        session.location = self.location.clone();
        session.is_online = self.is_online;
        session.speaker_name = self.speaker_name.clone();
        session.duration_minutes = self.duration_minutes;
        if let Some(settings) = self.settings.clone() {
            if !settings.is_valid() {
                return Err(UseCaseError::InvalidSettings);
            }
            session.settings = settings;
        }

        ctx.repos
            .sessions
            .insert(&session)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(session)
    }
}
