use crate::error::AttendaError;
use crate::shared::usecase::UseCase;
use attenda_domain::{SessionReminderDetails, SessionReminderEmail, ID};
use attenda_infra::AttendaContext;
use tracing::warn;

/// The deferred send fired by the drain job for one `ScheduledReminder`
/// row. Every check is re-done from scratch so the use case stays safe to
/// re-invoke: the ledger may have been written by a sweep in the meantime,
/// the configuration may have been disabled or deleted since enrollment.
#[derive(Debug)]
pub struct SendIndividualReminderUseCase {
    pub session_id: ID,
    pub user_id: ID,
    pub reminder_type: String,
}

#[derive(Debug, PartialEq)]
pub enum IndividualSendOutcome {
    Sent,
    AlreadySent,
    /// Dropped on purpose, with the reason.
    Skipped(String),
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SessionNotFound(ID),
    UserNotFound(ID),
    SendFailed(String),
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
            UseCaseError::SendFailed(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendIndividualReminderUseCase {
    type Response = IndividualSendOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SendIndividualReminder";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        if ctx
            .repos
            .reminder_emails
            .is_sent(&self.session_id, &self.user_id, &self.reminder_type)
            .await
        {
            return Ok(IndividualSendOutcome::AlreadySent);
        }

        let config = match ctx
            .repos
            .reminder_configs
            .find_by_type(&self.reminder_type)
            .await
        {
            Some(config) if config.is_enabled => config,
            Some(_) => {
                return Ok(IndividualSendOutcome::Skipped(format!(
                    "The reminder configuration {} is disabled",
                    self.reminder_type
                )))
            }
            None => {
                return Ok(IndividualSendOutcome::Skipped(format!(
                    "The reminder configuration {} no longer exists",
                    self.reminder_type
                )))
            }
        };

        let session = ctx
            .repos
            .sessions
            .find(&self.session_id)
            .await
            .ok_or_else(|| UseCaseError::SessionNotFound(self.session_id.clone()))?;
        let user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        if user.email.trim().is_empty() {
            return Ok(IndividualSendOutcome::Skipped(
                "The user has no email address".into(),
            ));
        }
        if !user.preferences.allows(&config.preference_key()) {
            return Ok(IndividualSendOutcome::Skipped(
                "The user has disabled this reminder".into(),
            ));
        }

        let subject = config.render_subject(&session.title, &user.full_name);
        let details = SessionReminderDetails::from(&session);
        match ctx
            .mailer
            .send_session_reminder(&user.email, &user.full_name, &subject, &details)
            .await
        {
            Ok(receipt) => {
                let row = SessionReminderEmail::sent(
                    self.session_id.clone(),
                    self.user_id.clone(),
                    &self.reminder_type,
                    ctx.sys.get_timestamp_millis(),
                    receipt.message_id,
                );
                if let Err(e) = ctx.repos.reminder_emails.insert(&row).await {
                    warn!(
                        "Unable to record reminder send for session {} and user {}: {:?}",
                        self.session_id, self.user_id, e
                    );
                }
                Ok(IndividualSendOutcome::Sent)
            }
            Err(e) => {
                let error = format!("{}", e);
                let row = SessionReminderEmail::failed(
                    self.session_id.clone(),
                    self.user_id.clone(),
                    &self.reminder_type,
                    ctx.sys.get_timestamp_millis(),
                    &error,
                );
                if let Err(insert_err) = ctx.repos.reminder_emails.insert(&row).await {
                    warn!(
                        "Unable to record reminder failure for session {} and user {}: {:?}",
                        self.session_id, self.user_id, insert_err
                    );
                }
                Err(UseCaseError::SendFailed(error))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attenda_domain::{ReminderConfiguration, Session, User};
    use attenda_infra::{setup_context, InMemoryMailer};
    use std::sync::Arc;

    fn config(reminder_type: &str, minutes_before: i64, is_enabled: bool) -> ReminderConfiguration {
        ReminderConfiguration {
            id: Default::default(),
            reminder_type: reminder_type.into(),
            minutes_before,
            is_enabled,
            email_subject_template: "Starting soon: {session_title}".into(),
            display_name: reminder_type.into(),
            sort_order: 0,
        }
    }

    async fn seeded_context() -> (AttendaContext, Arc<InMemoryMailer>, Session, User) {
        let mut ctx = setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();
        let now = ctx.sys.get_timestamp_millis();

        let session = Session::new("Rust 101", now + 30 * 60 * 1000, now);
        ctx.repos
            .sessions
            .insert(&session)
            .await
            .expect("To insert session");
        let user = User::new("ada@example.com", "Ada Lovelace", now);
        ctx.repos.users.insert(&user).await.expect("To insert user");
        (ctx, mailer, session, user)
    }

    #[actix_web::main]
    #[test]
    async fn sends_once_then_reports_already_sent() {
        let (ctx, mailer, session, user) = seeded_context().await;
        ctx.repos
            .reminder_configs
            .insert(&config("30min", 30, true))
            .await
            .expect("To insert config");

        let mut usecase = SendIndividualReminderUseCase {
            session_id: session.id.clone(),
            user_id: user.id.clone(),
            reminder_type: "30min".into(),
        };
        let outcome = usecase.execute(&ctx).await.expect("To send");
        assert_eq!(outcome, IndividualSendOutcome::Sent);
        assert_eq!(mailer.sent_count(), 1);
        {
            let sent = mailer.sent.lock().unwrap();
            assert_eq!(sent[0].subject, "Starting soon: Rust 101");
        }

        let mut again = SendIndividualReminderUseCase {
            session_id: session.id,
            user_id: user.id,
            reminder_type: "30min".into(),
        };
        let outcome = again.execute(&ctx).await.expect("To send");
        assert_eq!(outcome, IndividualSendOutcome::AlreadySent);
        assert_eq!(mailer.sent_count(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn disabled_or_missing_config_is_a_skip() {
        let (ctx, mailer, session, user) = seeded_context().await;
        ctx.repos
            .reminder_configs
            .insert(&config("30min", 30, false))
            .await
            .expect("To insert config");

        let mut usecase = SendIndividualReminderUseCase {
            session_id: session.id.clone(),
            user_id: user.id.clone(),
            reminder_type: "30min".into(),
        };
        let outcome = usecase.execute(&ctx).await.expect("To run");
        assert_eq!(
            outcome,
            IndividualSendOutcome::Skipped("The reminder configuration 30min is disabled".into())
        );

        let mut unknown = SendIndividualReminderUseCase {
            session_id: session.id,
            user_id: user.id,
            reminder_type: "2h".into(),
        };
        let outcome = unknown.execute(&ctx).await.expect("To run");
        assert_eq!(
            outcome,
            IndividualSendOutcome::Skipped(
                "The reminder configuration 2h no longer exists".into()
            )
        );
        assert_eq!(mailer.sent_count(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn respects_user_preferences() {
        let (ctx, mailer, session, mut user) = seeded_context().await;
        ctx.repos
            .reminder_configs
            .insert(&config("30min", 30, true))
            .await
            .expect("To insert config");
        user.preferences.disable("remind_30_minutes_before");
        ctx.repos.users.save(&user).await.expect("To save user");

        let mut usecase = SendIndividualReminderUseCase {
            session_id: session.id,
            user_id: user.id,
            reminder_type: "30min".into(),
        };
        let outcome = usecase.execute(&ctx).await.expect("To run");
        assert_eq!(
            outcome,
            IndividualSendOutcome::Skipped("The user has disabled this reminder".into())
        );
        assert_eq!(mailer.sent_count(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn failed_send_blocks_the_retry() {
        let (ctx, mailer, session, user) = seeded_context().await;
        mailer.fail_delivery_to("ada@example.com");
        ctx.repos
            .reminder_configs
            .insert(&config("30min", 30, true))
            .await
            .expect("To insert config");

        let mut usecase = SendIndividualReminderUseCase {
            session_id: session.id.clone(),
            user_id: user.id.clone(),
            reminder_type: "30min".into(),
        };
        let err = usecase.execute(&ctx).await.unwrap_err();
        assert!(matches!(err, UseCaseError::SendFailed(_)));

        // The failed ledger row makes a re-invocation a no-op
        let mut again = SendIndividualReminderUseCase {
            session_id: session.id,
            user_id: user.id,
            reminder_type: "30min".into(),
        };
        let outcome = again.execute(&ctx).await.expect("To run");
        assert_eq!(outcome, IndividualSendOutcome::AlreadySent);
    }
}
