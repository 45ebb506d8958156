mod inmemory;
mod postgres;

use attenda_domain::{ScheduledReminder, ID};
pub use inmemory::InMemoryScheduledReminderRepo;
pub use postgres::PostgresScheduledReminderRepo;

use super::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IScheduledReminderRepo: Send + Sync {
    async fn bulk_insert(&self, reminders: &[ScheduledReminder]) -> anyhow::Result<()>;
    /// Claims every reminder due at or before `before` by deleting and
    /// returning it in one operation, so two drain runs never hand out the
    /// same row.
    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledReminder>;
    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult;
    async fn delete_by_user(&self, user_id: &ID) -> DeleteResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_context;

    fn scheduled(session_id: &ID, send_at: i64) -> ScheduledReminder {
        ScheduledReminder {
            id: Default::default(),
            session_id: session_id.clone(),
            user_id: ID::new(),
            reminder_type: "24h".into(),
            send_at,
        }
    }

    #[tokio::test]
    async fn claim_removes_due_reminders() {
        let ctx = setup_context().await;

        let session_id = ID::new();
        let due = scheduled(&session_id, 1_000);
        let not_due = scheduled(&session_id, 5_000);
        ctx.repos
            .scheduled_reminders
            .bulk_insert(&[due.clone(), not_due.clone()])
            .await
            .expect("To insert scheduled reminders");

        let claimed = ctx.repos.scheduled_reminders.delete_all_before(2_000).await;
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].id, due.id);

        // Second claim for the same window comes back empty
        assert!(ctx.repos.scheduled_reminders.delete_all_before(2_000).await.is_empty());

        let rest = ctx.repos.scheduled_reminders.delete_all_before(10_000).await;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, not_due.id);
    }

    #[tokio::test]
    async fn delete_by_session_drops_pending_rows() {
        let ctx = setup_context().await;

        let session_id = ID::new();
        ctx.repos
            .scheduled_reminders
            .bulk_insert(&[scheduled(&session_id, 1_000), scheduled(&ID::new(), 1_000)])
            .await
            .expect("To insert scheduled reminders");

        let result = ctx.repos.scheduled_reminders.delete_by_session(&session_id).await;
        assert_eq!(result.deleted_count, 1);
        assert_eq!(ctx.repos.scheduled_reminders.delete_all_before(2_000).await.len(), 1);
    }
}
