use super::batch::BatchDispatcher;
use super::pending::{find_sessions_in_window, resolve_pending};
use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::dtos::{ConfigSweepResult, SweepSummary};
use attenda_infra::AttendaContext;

pub async fn sweep_reminders_controller(
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let usecase = ProcessDueRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(summary))
        .map_err(AttendaError::from)
}

/// One sweep over every enabled reminder configuration. The same use case
/// backs the interval job and the `POST /reminders/sweep` route.
#[derive(Debug)]
pub struct ProcessDueRemindersUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessDueRemindersUseCase {
    type Response = SweepSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessDueReminders";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let configs = ctx.repos.reminder_configs.find_enabled().await;
        let dispatcher = BatchDispatcher::new(ctx.config.batch.clone());
        let mut summary = SweepSummary::default();

        for config in configs {
            let now = ctx.sys.get_timestamp_millis();
            let sessions = find_sessions_in_window(&config, now, ctx).await;
            let pending = resolve_pending(&config, &sessions, ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?;

            summary.processed += 1;
            if pending.is_empty() {
                summary.results.push(ConfigSweepResult {
                    reminder_type: config.reminder_type.clone(),
                    pending: 0,
                    sent: 0,
                    failed: 0,
                });
                continue;
            }

            let pending_count = pending.len();
            let dispatched = dispatcher.dispatch(&config, pending, ctx).await;
            summary.total_reminders += pending_count;
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

#[cfg(test)]
mod test {
    use super::*;
    use attenda_domain::{Enrollment, ReminderConfiguration, Session, User};
    use attenda_infra::{setup_context, InMemoryMailer};
    use std::sync::Arc;

    fn config(reminder_type: &str, minutes_before: i64, is_enabled: bool) -> ReminderConfiguration {
        ReminderConfiguration {
            id: Default::default(),
            reminder_type: reminder_type.into(),
            minutes_before,
            is_enabled,
            email_subject_template: "Reminder: {session_title}".into(),
            display_name: reminder_type.into(),
            sort_order: 0,
        }
    }

    #[actix_web::main]
    #[test]
    async fn sweep_sends_once_and_is_idempotent() {
        let mut ctx = setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();
        let now = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminder_configs
            .insert(&config("1h", 60, true))
            .await
            .expect("To insert config");

        let session = Session::new("Rust 101", now + 60 * 60 * 1000, now);
        ctx.repos
            .sessions
            .insert(&session)
            .await
            .expect("To insert session");
        let user = User::new("ada@example.com", "Ada Lovelace", now);
        ctx.repos.users.insert(&user).await.expect("To insert user");
        let enrollment = Enrollment::new(session.id.clone(), user.id.clone(), now);
        ctx.repos
            .enrollments
            .insert(&enrollment)
            .await
            .expect("To insert enrollment");

        let summary = ProcessDueRemindersUseCase {}
            .execute(&ctx)
            .await
            .expect("To sweep");
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.total_reminders, 1);
        assert_eq!(summary.total_failed, 0);
        assert_eq!(mailer.sent_count(), 1);
        assert!(ctx
            .repos
            .reminder_emails
            .is_sent(&session.id, &user.id, "1h")
            .await);

        // Second sweep inside the same window resolves nothing new
        let summary = ProcessDueRemindersUseCase {}
            .execute(&ctx)
            .await
            .expect("To sweep");
        assert_eq!(summary.total_reminders, 0);
        assert_eq!(mailer.sent_count(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn disabled_configs_and_empty_windows_yield_zero_results() {
        let ctx = setup_context().await;

        ctx.repos
            .reminder_configs
            .insert(&config("1h", 60, true))
            .await
            .expect("To insert config");
        ctx.repos
            .reminder_configs
            .insert(&config("24h", 24 * 60, false))
            .await
            .expect("To insert config");

        let summary = ProcessDueRemindersUseCase {}
            .execute(&ctx)
            .await
            .expect("To sweep");
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.results[0].reminder_type, "1h");
        assert_eq!(summary.results[0].pending, 0);
    }

    #[actix_web::main]
    #[test]
    async fn session_outside_window_is_not_swept() {
        let mut ctx = setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();
        let now = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminder_configs
            .insert(&config("1h", 60, true))
            .await
            .expect("To insert config");

        // Starts 70 minutes out, outside the one hour window's tolerance
        let session = Session::new("Rust 101", now + 70 * 60 * 1000, now);
        ctx.repos
            .sessions
            .insert(&session)
            .await
            .expect("To insert session");
        let user = User::new("ada@example.com", "Ada Lovelace", now);
        ctx.repos.users.insert(&user).await.expect("To insert user");
        let enrollment = Enrollment::new(session.id.clone(), user.id.clone(), now);
        ctx.repos
            .enrollments
            .insert(&enrollment)
            .await
            .expect("To insert enrollment");

        let summary = ProcessDueRemindersUseCase {}
            .execute(&ctx)
            .await
            .expect("To sweep");
        assert_eq!(summary.total_reminders, 0);
        assert_eq!(mailer.sent_count(), 0);
    }
}
