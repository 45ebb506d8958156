use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::review_attendance::*;
use attenda_domain::{AttendanceStatus, SessionAttendance, ID};
use attenda_infra::AttendaContext;

pub async fn review_attendance_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = ReviewAttendanceUseCase {
        attendance_id: path_params.attendance_id.clone(),
        approved: body.approved,
        approved_by: body.approved_by,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|attendance| HttpResponse::Ok().json(APIResponse::new(attendance)))
        .map_err(AttendaError::from)
}

/// Settles a pending attendance record one way or the other and stamps who
/// made the call and when.
#[derive(Debug)]
pub struct ReviewAttendanceUseCase {
    pub attendance_id: ID,
    pub approved: bool,
    pub approved_by: ID,
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(attendance_id) => Self::NotFound(format!(
                "The attendance record with id: {}, was not found.",
                attendance_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReviewAttendanceUseCase {
    type Response = SessionAttendance;

    type Error = UseCaseError;

    const NAME: &'static str = "ReviewAttendance";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let mut attendance = ctx
            .repos
            .attendance
            .find(&self.attendance_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.attendance_id.clone()))?;

        attendance.status = if self.approved {
            AttendanceStatus::Approved
        } else {
            AttendanceStatus::Rejected
        };
        attendance.approved_by = Some(self.approved_by.clone());
        attendance.approved_at = Some(ctx.sys.get_timestamp_millis());
        if let Some(notes) = self.notes.take() {
            attendance.notes = Some(notes);
        }

        ctx.repos
            .attendance
            .save(&attendance)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(attendance)
    }
}
