use super::IScheduledReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use attenda_domain::{ScheduledReminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresScheduledReminderRepo {
    pool: PgPool,
}

impl PostgresScheduledReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledReminderRaw {
    reminder_uid: Uuid,
    session_uid: Uuid,
    user_uid: Uuid,
    reminder_type: String,
    send_at: i64,
}

impl From<ScheduledReminderRaw> for ScheduledReminder {
    fn from(raw: ScheduledReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            session_id: raw.session_uid.into(),
            user_id: raw.user_uid.into(),
            reminder_type: raw.reminder_type,
            send_at: raw.send_at,
        }
    }
}

#[async_trait::async_trait]
impl IScheduledReminderRepo for PostgresScheduledReminderRepo {
    async fn bulk_insert(&self, reminders: &[ScheduledReminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            sqlx::query(
                r#"
                INSERT INTO scheduled_reminders
                (reminder_uid, session_uid, user_uid, reminder_type, send_at)
                VALUES($1, $2, $3, $4, $5)
                "#,
            )
            .bind(reminder.id.inner_ref())
            .bind(reminder.session_id.inner_ref())
            .bind(reminder.user_id.inner_ref())
            .bind(&reminder.reminder_type)
            .bind(reminder.send_at)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledReminder> {
        sqlx::query_as::<_, ScheduledReminderRaw>(
            r#"
            DELETE FROM scheduled_reminders
            WHERE send_at <= $1
            RETURNING *
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|reminder| reminder.into())
        .collect()
    }

    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult {
        let deleted_count = sqlx::query(
            r#"
            DELETE FROM scheduled_reminders
            WHERE session_uid = $1
            "#,
        )
        .bind(session_id.inner_ref())
        .execute(&self.pool)
        .await
        .map(|res| res.rows_affected() as i64)
        .unwrap_or(0);
        DeleteResult { deleted_count }
    }

    async fn delete_by_user(&self, user_id: &ID) -> DeleteResult {
        let deleted_count = sqlx::query(
            r#"
            DELETE FROM scheduled_reminders
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await
        .map(|res| res.rows_affected() as i64)
        .unwrap_or(0);
        DeleteResult { deleted_count }
    }
}
