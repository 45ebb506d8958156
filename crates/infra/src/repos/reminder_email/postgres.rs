use super::IReminderEmailRepo;
use attenda_domain::{EmailStatus, SessionReminderEmail, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderEmailRepo {
    pool: PgPool,
}

impl PostgresReminderEmailRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderEmailRaw {
    email_uid: Uuid,
    session_uid: Uuid,
    user_uid: Uuid,
    reminder_type: String,
    sent_at: i64,
    email_status: String,
    provider_message_id: Option<String>,
    retry_count: i64,
    last_error: Option<String>,
}

#[derive(Debug, FromRow)]
struct SentKeyRaw {
    session_uid: Uuid,
    user_uid: Uuid,
}

impl From<ReminderEmailRaw> for SessionReminderEmail {
    fn from(raw: ReminderEmailRaw) -> Self {
        Self {
            id: raw.email_uid.into(),
            session_id: raw.session_uid.into(),
            user_id: raw.user_uid.into(),
            reminder_type: raw.reminder_type,
            sent_at: raw.sent_at,
            email_status: EmailStatus::from_str(&raw.email_status),
            provider_message_id: raw.provider_message_id,
            retry_count: raw.retry_count,
            last_error: raw.last_error,
        }
    }
}

#[async_trait::async_trait]
impl IReminderEmailRepo for PostgresReminderEmailRepo {
    async fn insert(&self, email: &SessionReminderEmail) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO session_reminder_emails(email_uid, session_uid, user_uid,
                reminder_type, sent_at, email_status, provider_message_id,
                retry_count, last_error)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (session_uid, user_uid, reminder_type) DO NOTHING
            "#,
        )
        .bind(email.id.inner_ref())
        .bind(email.session_id.inner_ref())
        .bind(email.user_id.inner_ref())
        .bind(&email.reminder_type)
        .bind(email.sent_at)
        .bind(email.email_status.as_str())
        .bind(&email.provider_message_id)
        .bind(email.retry_count)
        .bind(&email.last_error)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn is_sent(&self, session_id: &ID, user_id: &ID, reminder_type: &str) -> bool {
        sqlx::query_as::<_, SentKeyRaw>(
            r#"
            SELECT session_uid, user_uid FROM session_reminder_emails
            WHERE session_uid = $1 AND user_uid = $2 AND reminder_type = $3
            "#,
        )
        .bind(session_id.inner_ref())
        .bind(user_id.inner_ref())
        .bind(reminder_type)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .is_some()
    }

    async fn find_sent_keys(
        &self,
        session_ids: &[ID],
        reminder_type: &str,
    ) -> anyhow::Result<Vec<(ID, ID)>> {
        let session_ids = session_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let keys = sqlx::query_as::<_, SentKeyRaw>(
            r#"
            SELECT session_uid, user_uid FROM session_reminder_emails
            WHERE reminder_type = $1 AND session_uid = ANY($2)
            "#,
        )
        .bind(reminder_type)
        .bind(&session_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys
            .into_iter()
            .map(|key| (key.session_uid.into(), key.user_uid.into()))
            .collect())
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<SessionReminderEmail> {
        sqlx::query_as::<_, ReminderEmailRaw>(
            r#"
            SELECT * FROM session_reminder_emails
            WHERE session_uid = $1
            ORDER BY sent_at
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|email| email.into())
        .collect()
    }
}
