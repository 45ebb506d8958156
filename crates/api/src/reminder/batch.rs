//! Batched, rate-limited dispatch of pending reminder emails.
//!
//! Jobs are chunked and every chunk is sent concurrently, one chunk at a
//! time with a pause in between. The pause is the only throttle protecting
//! the mail provider's rate limit. A job failure only marks that job; a
//! batch-level failure (the ledger pre-fetch) retries the whole batch with
//! exponential backoff until `max_retries` is exhausted.

use actix_web::rt::time::sleep;
use attenda_api_structs::dtos::{DispatchSummary, FailedReminder};
use attenda_domain::{PendingReminder, ReminderConfiguration, SessionReminderEmail, ID};
use attenda_infra::{AttendaContext, BatchConfig};
use futures::future::join_all;
use std::time::Duration;
use tracing::warn;

enum SendOutcome {
    Sent,
    /// Ledger row already present, counted as success so benign races do
    /// not inflate failure counts.
    AlreadySent,
    Failed {
        user_id: ID,
        email: String,
        error: String,
    },
}

pub struct BatchDispatcher {
    config: BatchConfig,
}

impl BatchDispatcher {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub async fn dispatch(
        &self,
        reminder_config: &ReminderConfiguration,
        jobs: Vec<PendingReminder>,
        ctx: &AttendaContext,
    ) -> DispatchSummary {
        let batch_size = self.config.batch_size.max(1);
        let batches = jobs
            .chunks(batch_size)
            .map(|batch| batch.to_vec())
            .collect::<Vec<_>>();

        let mut summary = DispatchSummary {
            total_batches: batches.len(),
            ..Default::default()
        };
        let last = batches.len().saturating_sub(1);
        for (index, batch) in batches.into_iter().enumerate() {
            self.dispatch_batch(reminder_config, &batch, ctx, &mut summary)
                .await;
            if index < last {
                sleep(Duration::from_millis(self.config.batch_delay_millis)).await;
            }
        }
        summary
    }

    async fn dispatch_batch(
        &self,
        reminder_config: &ReminderConfiguration,
        batch: &[PendingReminder],
        ctx: &AttendaContext,
        summary: &mut DispatchSummary,
    ) {
        let mut attempt = 0;
        loop {
            match self.try_batch(reminder_config, batch, ctx).await {
                Ok(outcomes) => {
                    for outcome in outcomes {
                        match outcome {
                            SendOutcome::Sent | SendOutcome::AlreadySent => summary.sent += 1,
                            SendOutcome::Failed {
                                user_id,
                                email,
                                error,
                            } => {
                                summary.failed += 1;
                                summary.failed_reminders.push(FailedReminder {
                                    user_id,
                                    email,
                                    error,
                                });
                            }
                        }
                    }
                    return;
                }
                Err(e) if attempt < self.config.max_retries => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        "Reminder batch for type {} failed on attempt {}: {:?}. Retrying in {:?}",
                        reminder_config.reminder_type,
                        attempt + 1,
                        e,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    // Retries exhausted without a single send attempt, so no
                    // ledger rows exist and the next sweep picks these up.
                    for job in batch {
                        summary.failed += 1;
                        summary.failed_reminders.push(FailedReminder {
                            user_id: job.user_id.clone(),
                            email: job.user_email.clone(),
                            error: format!("{}", e),
                        });
                    }
                    return;
                }
            }
        }
    }

    /// One attempt at a batch: a fresh ledger pre-fetch, then every send
    /// concurrently with its own outcome capture.
    async fn try_batch(
        &self,
        reminder_config: &ReminderConfiguration,
        batch: &[PendingReminder],
        ctx: &AttendaContext,
    ) -> anyhow::Result<Vec<SendOutcome>> {
        let session_ids = batch
            .iter()
            .map(|job| job.session_id.clone())
            .collect::<Vec<_>>();
        let sent_keys = ctx
            .repos
            .reminder_emails
            .find_sent_keys(&session_ids, &reminder_config.reminder_type)
            .await?;

        let sends = batch
            .iter()
            .map(|job| send_single_reminder(reminder_config, job, &sent_keys, ctx));
        Ok(join_all(sends).await)
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let backoff = self.config.initial_backoff_millis as f64
            * self.config.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis((backoff as u64).min(self.config.max_backoff_millis))
    }
}

async fn send_single_reminder(
    reminder_config: &ReminderConfiguration,
    job: &PendingReminder,
    sent_keys: &[(ID, ID)],
    ctx: &AttendaContext,
) -> SendOutcome {
    let in_prefetch = sent_keys
        .iter()
        .any(|(session_id, user_id)| *session_id == job.session_id && *user_id == job.user_id);
    if in_prefetch
        || ctx
            .repos
            .reminder_emails
            .is_sent(&job.session_id, &job.user_id, &reminder_config.reminder_type)
            .await
    {
        return SendOutcome::AlreadySent;
    }

    let subject = reminder_config.render_subject(&job.session.title, &job.user_name);
    match ctx
        .mailer
        .send_session_reminder(&job.user_email, &job.user_name, &subject, &job.session)
        .await
    {
        Ok(receipt) => {
            let row = SessionReminderEmail::sent(
                job.session_id.clone(),
                job.user_id.clone(),
                &reminder_config.reminder_type,
                ctx.sys.get_timestamp_millis(),
                receipt.message_id,
            );
            // Recording is best-effort, a ledger write failure must not turn
            // a delivered email into a reported failure.
            if let Err(e) = ctx.repos.reminder_emails.insert(&row).await {
                warn!(
                    "Unable to record reminder send for session {} and user {}: {:?}",
                    job.session_id, job.user_id, e
                );
            }
            SendOutcome::Sent
        }
        Err(e) => {
            let error = format!("{}", e);
            let row = SessionReminderEmail::failed(
                job.session_id.clone(),
                job.user_id.clone(),
                &reminder_config.reminder_type,
                ctx.sys.get_timestamp_millis(),
                &error,
            );
            if let Err(insert_err) = ctx.repos.reminder_emails.insert(&row).await {
                warn!(
                    "Unable to record reminder failure for session {} and user {}: {:?}",
                    job.session_id, job.user_id, insert_err
                );
            }
            SendOutcome::Failed {
                user_id: job.user_id.clone(),
                email: job.user_email.clone(),
                error,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use attenda_domain::{Session, SessionReminderDetails};
    use attenda_infra::InMemoryMailer;
    use std::sync::Arc;

    fn reminder_config() -> ReminderConfiguration {
        ReminderConfiguration {
            id: Default::default(),
            reminder_type: "1h".into(),
            minutes_before: 60,
            is_enabled: true,
            email_subject_template: "Reminder: {session_title}".into(),
            display_name: "One hour before".into(),
            sort_order: 0,
        }
    }

    fn job(session: &Session, email: &str, name: &str) -> PendingReminder {
        PendingReminder {
            session_id: session.id.clone(),
            user_id: Default::default(),
            user_email: email.into(),
            user_name: name.into(),
            session: SessionReminderDetails::from(session),
        }
    }

    #[actix_web::main]
    #[test]
    async fn one_failing_job_does_not_abort_its_batch() {
        let mut ctx = attenda_infra::setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        mailer.fail_delivery_to("grace@example.com");
        ctx.mailer = mailer.clone();

        let now = ctx.sys.get_timestamp_millis();
        let session = Session::new("Rust 101", now + 60 * 60 * 1000, now);
        let jobs = vec![
            job(&session, "ada@example.com", "Ada"),
            job(&session, "grace@example.com", "Grace"),
            job(&session, "alan@example.com", "Alan"),
        ];

        let dispatcher = BatchDispatcher::new(BatchConfig {
            batch_delay_millis: 0,
            ..Default::default()
        });
        let summary = dispatcher.dispatch(&reminder_config(), jobs, &ctx).await;

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_batches, 1);
        assert_eq!(summary.failed_reminders.len(), 1);
        assert_eq!(summary.failed_reminders[0].email, "grace@example.com");
        assert_eq!(mailer.sent_count(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn splits_jobs_into_batches_of_configured_size() {
        let mut ctx = attenda_infra::setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();

        let now = ctx.sys.get_timestamp_millis();
        let session = Session::new("Rust 101", now + 60 * 60 * 1000, now);
        let jobs = (0..5)
            .map(|n| job(&session, &format!("user{}@example.com", n), "User"))
            .collect::<Vec<_>>();

        let dispatcher = BatchDispatcher::new(BatchConfig {
            batch_size: 2,
            batch_delay_millis: 0,
            ..Default::default()
        });
        let summary = dispatcher.dispatch(&reminder_config(), jobs, &ctx).await;

        assert_eq!(summary.total_batches, 3);
        assert_eq!(summary.sent, 5);
        assert_eq!(mailer.sent_count(), 5);
    }

    #[actix_web::main]
    #[test]
    async fn failed_send_writes_a_blocking_ledger_row() {
        let mut ctx = attenda_infra::setup_context().await;
        let mailer = Arc::new(InMemoryMailer::new());
        mailer.fail_delivery_to("ada@example.com");
        ctx.mailer = mailer.clone();

        let now = ctx.sys.get_timestamp_millis();
        let session = Session::new("Rust 101", now + 60 * 60 * 1000, now);
        let failing_job = job(&session, "ada@example.com", "Ada");
        let user_id = failing_job.user_id.clone();

        let dispatcher = BatchDispatcher::new(BatchConfig {
            batch_delay_millis: 0,
            ..Default::default()
        });
        let summary = dispatcher
            .dispatch(&reminder_config(), vec![failing_job.clone()], &ctx)
            .await;
        assert_eq!(summary.failed, 1);
        assert!(ctx
            .repos
            .reminder_emails
            .is_sent(&session.id, &user_id, "1h")
            .await);

        // The failed row now blocks the retry, it reports as already sent
        let summary = dispatcher
            .dispatch(&reminder_config(), vec![failing_job], &ctx)
            .await;
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(mailer.sent_count(), 0);
    }
}
