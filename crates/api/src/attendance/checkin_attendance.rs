use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::checkin_attendance::*;
use attenda_domain::{required_attendance_minutes, SessionAttendance, ID};
use attenda_infra::AttendaContext;

pub async fn checkin_attendance_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = ManualCheckInUseCase {
        session_id: path_params.session_id.clone(),
        user_id: body.user_id,
        duration_minutes: body.duration_minutes,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|attendance| HttpResponse::Created().json(APIResponse::new(attendance)))
        .map_err(AttendaError::from)
}

/// Records attendance for a user by hand, without a report. The duration
/// defaults to the session's own length, eligibility is judged against the
/// stored session settings and the record still goes through review.
#[derive(Debug)]
pub struct ManualCheckInUseCase {
    pub session_id: ID,
    pub user_id: ID,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SessionNotFound(ID),
    UserNotFound(ID),
    AlreadyCheckedIn,
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SessionNotFound(session_id) => Self::NotFound(format!(
                "The session with id: {}, was not found.",
                session_id
            )),
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::AlreadyCheckedIn => Self::Conflict(
                "An attendance record already exists for this user and session.".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ManualCheckInUseCase {
    type Response = SessionAttendance;

    type Error = UseCaseError;

    const NAME: &'static str = "ManualCheckIn";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let session = ctx
            .repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;
        ctx.repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        if ctx
            .repos
            .attendance
            .find_by_session_and_user(&self.session_id, &self.user_id)
            .await
            .is_some()
        {
            return Err(UseCaseError::AlreadyCheckedIn);
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut attendance =
            SessionAttendance::manual_check_in(self.session_id.clone(), self.user_id.clone(), now);
        attendance.duration_minutes = self
            .duration_minutes
            .unwrap_or_else(|| session.stored_duration_minutes());
        let required = required_attendance_minutes(
            &session.settings,
            None,
            session.stored_duration_minutes(),
        );
        attendance.is_eligible_for_certificate = attendance.duration_minutes >= required;
        attendance.notes = self.notes.take();

        ctx.repos
            .attendance
            .insert(&attendance)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(attendance)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attenda_domain::{AttendanceSource, AttendanceStatus, Session, User};
    use attenda_infra::setup_context;

    async fn seeded_context() -> (AttendaContext, Session, User) {
        let ctx = setup_context().await;
        let now = ctx.sys.get_timestamp_millis();
        let session = Session::new("Rust 101", now - 3_600_000, now);
        ctx.repos
            .sessions
            .insert(&session)
            .await
            .expect("To insert session");
        let user = User::new("ada@example.com", "Ada Lovelace", now);
        ctx.repos.users.insert(&user).await.expect("To insert user");
        (ctx, session, user)
    }

    #[actix_web::main]
    #[test]
    async fn checkin_defaults_to_the_session_duration() {
        let (ctx, session, user) = seeded_context().await;

        let mut usecase = ManualCheckInUseCase {
            session_id: session.id.clone(),
            user_id: user.id.clone(),
            duration_minutes: None,
            notes: Some("walked in late".into()),
        };
        let attendance = usecase.execute(&ctx).await.expect("To check in");

        assert_eq!(attendance.duration_minutes, 60);
        assert!(attendance.is_eligible_for_certificate);
        assert_eq!(attendance.attendance_source, AttendanceSource::Manual);
        assert_eq!(attendance.status, AttendanceStatus::PendingApproval);
        assert_eq!(attendance.notes.as_deref(), Some("walked in late"));

        let mut duplicate = ManualCheckInUseCase {
            session_id: session.id,
            user_id: user.id,
            duration_minutes: None,
            notes: None,
        };
        let err = duplicate.execute(&ctx).await.unwrap_err();
        assert_eq!(err, UseCaseError::AlreadyCheckedIn);
    }

    #[actix_web::main]
    #[test]
    async fn explicit_short_duration_is_not_eligible() {
        let (ctx, session, user) = seeded_context().await;

        let mut usecase = ManualCheckInUseCase {
            session_id: session.id,
            user_id: user.id,
            duration_minutes: Some(10),
            notes: None,
        };
        let attendance = usecase.execute(&ctx).await.expect("To check in");
        // 10 attended of 30 required
        assert!(!attendance.is_eligible_for_certificate);
    }
}
