use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::update_session::*;
use attenda_domain::{Session, ID};
use attenda_infra::AttendaContext;

pub async fn update_session_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = UpdateSessionUseCase {
        session_id: path_params.session_id.clone(),
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        location: body.location,
        is_online: body.is_online,
        speaker_name: body.speaker_name,
        duration_minutes: body.duration_minutes,
    };

    execute(usecase, &ctx)
        .await
        .map(|session| HttpResponse::Ok().json(APIResponse::new(session)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct UpdateSessionUseCase {
    pub session_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub location: Option<String>,
    pub is_online: Option<bool>,
    pub speaker_name: Option<String>,
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EmptyTitle,
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(session_id) => {
                Self::NotFound(format!("The session with id: {}, was not found.", session_id))
            }
            UseCaseError::EmptyTitle => Self::BadClientData("A session needs a title".into()),
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The session end time has to be after the start time".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSessionUseCase {
    type Response = Session;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSession";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let mut session = ctx
            .repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.session_id.clone()))?;

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(UseCaseError::EmptyTitle);
            }
            session.title = title.trim().to_string();
        }
        if let Some(description) = self.description.take() {
            session.description = Some(description);
        }
        if let Some(start_ts) = self.start_ts {
            session.start_ts = start_ts;
        }
        if let Some(end_ts) = self.end_ts {
            session.end_ts = Some(end_ts);
        }
        if let Some(location) = self.location.take() {
            session.location = Some(location);
        }
        if let Some(is_online) = self.is_online {
            session.is_online = is_online;
        }
        if let Some(speaker_name) = self.speaker_name.take() {
            session.speaker_name = Some(speaker_name);
        }
        if let Some(duration_minutes) = self.duration_minutes {
            session.duration_minutes = Some(duration_minutes);
        }
        if let Some(end_ts) = session.end_ts {
            if end_ts <= session.start_ts {
                return Err(UseCaseError::InvalidTimespan);
            }
        }
        session.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .sessions
            .save(&session)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(session)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attenda_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn updates_only_the_given_fields() {
        let ctx = setup_context().await;
        let session = Session::new("Rust 101", 1_000_000, 0);
        ctx.repos.sessions.insert(&session).await.unwrap();

        let mut usecase = UpdateSessionUseCase {
            session_id: session.id.clone(),
            title: None,
            description: Some("Intro course".into()),
            start_ts: None,
            end_ts: None,
            location: None,
            is_online: Some(true),
            speaker_name: None,
            duration_minutes: Some(90),
        };
        let updated = usecase.execute(&ctx).await.expect("To update session");

        assert_eq!(updated.title, "Rust 101");
        assert_eq!(updated.description.as_deref(), Some("Intro course"));
        assert!(updated.is_online);
        assert_eq!(updated.duration_minutes, Some(90));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_session() {
        let ctx = setup_context().await;
        let mut usecase = UpdateSessionUseCase {
            session_id: Default::default(),
            title: None,
            description: None,
            start_ts: None,
            end_ts: None,
            location: None,
            is_online: None,
            speaker_name: None,
            duration_minutes: None,
        };

        assert!(usecase.execute(&ctx).await.is_err());
    }
}
