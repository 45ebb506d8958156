use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::clear_session_attendance::*;
use attenda_domain::ID;
use attenda_infra::AttendaContext;

pub async fn clear_session_attendance_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = ClearSessionAttendanceUseCase {
        session_id: path_params.session_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|deleted_count| HttpResponse::Ok().json(APIResponse { deleted_count }))
        .map_err(AttendaError::from)
}

/// Wipes every attendance record for a session so a botched report can be
/// re-uploaded from scratch.
#[derive(Debug)]
pub struct ClearSessionAttendanceUseCase {
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
impl UseCase for ClearSessionAttendanceUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "ClearSessionAttendance";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;

        let result = ctx.repos.attendance.delete_by_session(&self.session_id).await;

        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attenda_domain::{Session, SessionAttendance};
    use attenda_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn clears_only_the_target_session() {
        let ctx = setup_context().await;
        let now = ctx.sys.get_timestamp_millis();
        let session = Session::new("Rust 101", now, now + 3_600_000);
        let other = Session::new("Rust 201", now, now + 3_600_000);
        for s in [&session, &other] {
            ctx.repos.sessions.insert(s).await.expect("To insert session");
            for _ in 0..2 {
                let record = SessionAttendance::manual_check_in(s.id.clone(), ID::new(), now);
                ctx.repos
                    .attendance
                    .insert(&record)
                    .await
                    .expect("To insert attendance");
            }
        }

        let mut usecase = ClearSessionAttendanceUseCase {
            session_id: session.id.clone(),
        };
        let deleted = usecase.execute(&ctx).await.expect("To clear attendance");
        assert_eq!(deleted, 2);
        assert!(ctx.repos.attendance.find_by_session(&session.id).await.is_empty());
        assert_eq!(ctx.repos.attendance.find_by_session(&other.id).await.len(), 2);

        // A second clear is a no-op, not an error
        let mut usecase = ClearSessionAttendanceUseCase {
            session_id: session.id,
        };
        assert_eq!(usecase.execute(&ctx).await, Ok(0));
    }
}
