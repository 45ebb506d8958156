use crate::error::AttendaError;
use crate::shared::usecase::UseCase;
use attenda_domain::{ScheduledReminder, ID};
use attenda_infra::AttendaContext;

/// Computes the deferred sends for one fresh enrollment: one
/// `ScheduledReminder` per enabled configuration whose send time is still
/// in the future. Past send times are skipped, a late enrollment gets no
/// catch-up mail. Runs as a subscriber of enrollment creation.
#[derive(Debug)]
pub struct ScheduleEnrollmentRemindersUseCase {
    pub session_id: ID,
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SessionNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SessionNotFound(session_id) => Self::NotFound(format!(
                "The session with id: {}, was not found.",
                session_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleEnrollmentRemindersUseCase {
    type Response = Vec<ScheduledReminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleEnrollmentReminders";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let session = ctx
            .repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let configs = ctx.repos.reminder_configs.find_enabled().await;
        let reminders = configs
            .iter()
            .filter_map(|config| {
                let send_at = session.start_ts - config.minutes_before * 60 * 1000;
                if send_at <= now {
                    return None;
                }
                Some(ScheduledReminder {
                    id: Default::default(),
                    session_id: self.session_id.clone(),
                    user_id: self.user_id.clone(),
                    reminder_type: config.reminder_type.clone(),
                    send_at,
                })
            })
            .collect::<Vec<_>>();

        if !reminders.is_empty() {
            ctx.repos
                .scheduled_reminders
                .bulk_insert(&reminders)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(reminders)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attenda_domain::{ReminderConfiguration, Session};
    use attenda_infra::setup_context;

    fn config(reminder_type: &str, minutes_before: i64) -> ReminderConfiguration {
        ReminderConfiguration {
            id: Default::default(),
            reminder_type: reminder_type.into(),
            minutes_before,
            is_enabled: true,
            email_subject_template: "Reminder: {session_title}".into(),
            display_name: reminder_type.into(),
            sort_order: 0,
        }
    }

    #[actix_web::main]
    #[test]
    async fn schedules_only_future_send_times() {
        let ctx = setup_context().await;
        let now = ctx.sys.get_timestamp_millis();
        for (reminder_type, minutes_before) in [("24h", 24 * 60), ("1h", 60), ("start", 0)] {
            ctx.repos
                .reminder_configs
                .insert(&config(reminder_type, minutes_before))
                .await
                .expect("To insert config");
        }

        // Two hours out: the day-before send time has already passed
        let session = Session::new("Rust 101", now + 2 * 60 * 60 * 1000, now);
        ctx.repos
            .sessions
            .insert(&session)
            .await
            .expect("To insert session");

        let mut usecase = ScheduleEnrollmentRemindersUseCase {
            session_id: session.id.clone(),
            user_id: Default::default(),
        };
        let reminders = usecase.execute(&ctx).await.expect("To schedule");

        let mut types = reminders
            .iter()
            .map(|reminder| reminder.reminder_type.clone())
            .collect::<Vec<_>>();
        types.sort();
        assert_eq!(types, vec!["1h".to_string(), "start".to_string()]);
        let one_hour = reminders
            .iter()
            .find(|reminder| reminder.reminder_type == "1h")
            .expect("1h reminder");
        assert_eq!(one_hour.send_at, session.start_ts - 60 * 60 * 1000);

        // The rows are claimable by the drain
        let claimed = ctx
            .repos
            .scheduled_reminders
            .delete_all_before(session.start_ts)
            .await;
        assert_eq!(claimed.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_session_is_an_error() {
        let ctx = setup_context().await;
        let session_id = ID::default();
        let mut usecase = ScheduleEnrollmentRemindersUseCase {
            session_id: session_id.clone(),
            user_id: Default::default(),
        };
        let err = usecase.execute(&ctx).await.unwrap_err();
        assert_eq!(err, UseCaseError::SessionNotFound(session_id));
    }
}
