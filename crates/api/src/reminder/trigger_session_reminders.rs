use super::batch::BatchDispatcher;
use super::pending::resolve_pending;
use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::dtos::{ConfigSweepResult, TriggerSummary};
use attenda_api_structs::trigger_session_reminders::*;
use attenda_domain::ID;
use attenda_infra::AttendaContext;
use tracing::info;

pub async fn trigger_session_reminders_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = TriggerSessionRemindersUseCase {
        session_id: path_params.session_id.clone(),
        reminder_types: body.reminder_types,
        triggered_by: body.triggered_by,
    };

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(summary))
        .map_err(AttendaError::from)
}

/// Immediately dispatches reminders for one session to every active
/// enrollment, bypassing the send window. Preferences and the ledger still
/// apply, so a trigger never double-sends.
#[derive(Debug)]
pub struct TriggerSessionRemindersUseCase {
    pub session_id: ID,
    pub reminder_types: Option<Vec<String>>,
    pub triggered_by: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SessionNotFound(ID),
    UnknownReminderType { given: String, valid: Vec<String> },
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SessionNotFound(session_id) => Self::NotFound(format!(
                "The session with id: {}, was not found.",
                session_id
            )),
            UseCaseError::UnknownReminderType { given, valid } => Self::BadClientData(format!(
                "Unknown reminder type: {}. Valid types are: {}",
                given,
                valid.join(", ")
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for TriggerSessionRemindersUseCase {
    type Response = TriggerSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "TriggerSessionReminders";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let session = ctx
            .repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;

        let enabled = ctx.repos.reminder_configs.find_enabled().await;
        let selected = match self.reminder_types.take() {
            Some(types) => {
                let mut selected = Vec::with_capacity(types.len());
                for reminder_type in types {
                    let config = enabled
                        .iter()
                        .find(|config| config.reminder_type == reminder_type)
                        .cloned()
                        .ok_or_else(|| UseCaseError::UnknownReminderType {
                            given: reminder_type.clone(),
                            valid: enabled
                                .iter()
                                .map(|config| config.reminder_type.clone())
                                .collect(),
                        })?;
                    selected.push(config);
                }
                selected
            }
            None => enabled,
        };

        info!(
            "Manual reminder trigger for session {} by user {} covering {} type(s)",
            self.session_id,
            self.triggered_by,
            selected.len()
        );

        let dispatcher = BatchDispatcher::new(ctx.config.batch.clone());
        let mut summary = TriggerSummary::default();
        for config in selected {
            let pending = resolve_pending(&config, std::slice::from_ref(&session), ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            let pending_count = pending.len();
            let dispatched = dispatcher.dispatch(&config, pending, ctx).await;
            summary.total_sent += dispatched.sent;
            summary.total_failed += dispatched.failed;
            summary.results.push(ConfigSweepResult {
                reminder_type: config.reminder_type.clone(),
                pending: pending_count,
                sent: dispatched.sent,
                failed: dispatched.failed,
            });
        }

        Ok(summary)
    }
}
