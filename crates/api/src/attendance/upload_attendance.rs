use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use attenda_api_structs::dtos::{RowError, UploadReport};
use attenda_domain::teams_report::{detect_sections, extract_meeting_info, parse_participant_rows};
use attenda_domain::{match_participant_to_user, required_attendance_minutes, SessionAttendance, ID};
use attenda_infra::{decode_report_bytes, AttendaContext};
use tracing::info;

#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    #[multipart(limit = "10MiB")]
    pub file: Bytes,
    #[multipart(rename = "sessionId")]
    pub session_id: Text<String>,
}

pub async fn upload_attendance_controller(
    MultipartForm(form): MultipartForm<UploadForm>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let session_id = form.session_id.0.parse::<ID>().map_err(|_| {
        AttendaError::BadClientData(format!("Invalid session id: {}", form.session_id.0))
    })?;
    let usecase = UploadAttendanceUseCase {
        session_id,
        file_name: form.file.file_name.clone().unwrap_or_default(),
        file_bytes: form.file.data.to_vec(),
    };

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(report))
        .map_err(AttendaError::from)
}

/// Ingests one Teams attendance report for a session: decode, slice into
/// sections, parse participants, resolve each row to a registered user and
/// upsert the attendance record. Unmatched or unsavable rows become entries
/// in the report's error list, they never abort the other rows.
#[derive(Debug)]
pub struct UploadAttendanceUseCase {
    pub session_id: ID,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SessionNotFound(ID),
    UnreadableFile(String),
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SessionNotFound(session_id) => Self::NotFound(format!(
                "The session with id: {}, was not found.",
                session_id
            )),
            UseCaseError::UnreadableFile(reason) => {
                Self::BadClientData(format!("Unable to read the report file: {}", reason))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UploadAttendanceUseCase {
    type Response = UploadReport;

    type Error = UseCaseError;

    const NAME: &'static str = "UploadAttendance";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let session = ctx
            .repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;

        let grid = decode_report_bytes(&self.file_bytes, &self.file_name)
            .map_err(|e| UseCaseError::UnreadableFile(format!("{}", e)))?;
        let sections = detect_sections(&grid);
        let meeting = extract_meeting_info(&sections, &grid);
        let participants = parse_participant_rows(&sections.participants);

        let required = required_attendance_minutes(
            &session.settings,
            meeting.duration_minutes,
            session.stored_duration_minutes(),
        );
        info!(
            "Attendance report for session {} carries {} participant row(s), eligibility needs {} minute(s)",
            self.session_id,
            participants.len(),
            required
        );

        let users = ctx.repos.users.find_all().await;
        let now = ctx.sys.get_timestamp_millis();
        let mut report = UploadReport {
            upload_id: Default::default(),
            total_records: participants.len(),
            success_count: 0,
            error_count: 0,
            errors: Vec::new(),
        };

        for participant in &participants {
            let user = match match_participant_to_user(participant, &users) {
                Some(user) => user,
                None => {
                    report.error_count += 1;
                    report.errors.push(RowError {
                        name: participant.name.clone(),
                        email: participant.email.clone(),
                        error: "User not found in system".into(),
                    });
                    continue;
                }
            };

            let incoming = SessionAttendance::from_report_row(
                self.session_id.clone(),
                user.id.clone(),
                participant.join_ts,
                participant.leave_ts,
                participant.duration_minutes,
                participant.duration_minutes >= required,
                now,
            );

            let existing = ctx
                .repos
                .attendance
                .find_by_session_and_user(&self.session_id, &user.id)
                .await;
            let outcome = match existing {
                Some(existing) if !existing.should_replace_with(participant.duration_minutes) => {
                    // Same-source shorter duration never regresses a record
                    Ok(())
                }
                Some(existing) => {
                    let mut replacement = incoming;
                    replacement.id = existing.id;
                    ctx.repos.attendance.save(&replacement).await
                }
                None => ctx.repos.attendance.insert(&incoming).await,
            };

            match outcome {
                Ok(()) => report.success_count += 1,
                Err(_) => {
                    report.error_count += 1;
                    report.errors.push(RowError {
                        name: participant.name.clone(),
                        email: participant.email.clone(),
                        error: "Unable to save the attendance record".into(),
                    });
                }
            }
        }

        Ok(report)
    }
}
