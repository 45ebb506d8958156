use super::ISessionRepo;
use attenda_domain::{Session, SessionSettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRaw {
    session_uid: Uuid,
    title: String,
    description: Option<String>,
    start_ts: i64,
    end_ts: Option<i64>,
    location: Option<String>,
    is_online: bool,
    speaker_name: Option<String>,
    duration_minutes: Option<i64>,
    min_attendance_minutes: i64,
    use_percentage: bool,
    attendance_percentage: i64,
    created: i64,
    updated: i64,
}

impl From<SessionRaw> for Session {
    fn from(raw: SessionRaw) -> Self {
        Self {
            id: raw.session_uid.into(),
            title: raw.title,
            description: raw.description,
            start_ts: raw.start_ts,
            end_ts: raw.end_ts,
            location: raw.location,
            is_online: raw.is_online,
            speaker_name: raw.speaker_name,
            duration_minutes: raw.duration_minutes,
            settings: SessionSettings {
                min_attendance_minutes: raw.min_attendance_minutes,
                use_percentage: raw.use_percentage,
                attendance_percentage: raw.attendance_percentage,
            },
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl ISessionRepo for PostgresSessionRepo {
    async fn insert(&self, session: &Session) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions(session_uid, title, description, start_ts, end_ts,
                location, is_online, speaker_name, duration_minutes,
                min_attendance_minutes, use_percentage, attendance_percentage,
                created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(session.id.inner_ref())
        .bind(&session.title)
        .bind(&session.description)
        .bind(session.start_ts)
        .bind(session.end_ts)
        .bind(&session.location)
        .bind(session.is_online)
        .bind(&session.speaker_name)
        .bind(session.duration_minutes)
        .bind(session.settings.min_attendance_minutes)
        .bind(session.settings.use_percentage)
        .bind(session.settings.attendance_percentage)
        .bind(session.created)
        .bind(session.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, session: &Session) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET title = $2,
                description = $3,
                start_ts = $4,
                end_ts = $5,
                location = $6,
                is_online = $7,
                speaker_name = $8,
                duration_minutes = $9,
                min_attendance_minutes = $10,
                use_percentage = $11,
                attendance_percentage = $12,
                updated = $13
            WHERE session_uid = $1
            "#,
        )
        .bind(session.id.inner_ref())
        .bind(&session.title)
        .bind(&session.description)
        .bind(session.start_ts)
        .bind(session.end_ts)
        .bind(&session.location)
        .bind(session.is_online)
        .bind(&session.speaker_name)
        .bind(session.duration_minutes)
        .bind(session.settings.min_attendance_minutes)
        .bind(session.settings.use_percentage)
        .bind(session.settings.attendance_percentage)
        .bind(session.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, session_id: &ID) -> Option<Session> {
        sqlx::query_as::<_, SessionRaw>(
            r#"
            SELECT * FROM sessions
            WHERE session_uid = $1
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|session| session.into())
    }

    async fn find_many(&self, session_ids: &[ID]) -> Vec<Session> {
        let session_ids = session_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        sqlx::query_as::<_, SessionRaw>(
            r#"
            SELECT * FROM sessions
            WHERE session_uid = ANY($1)
            "#,
        )
        .bind(&session_ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|session| session.into())
        .collect()
    }

    async fn find_all(&self) -> Vec<Session> {
        sqlx::query_as::<_, SessionRaw>(
            r#"
            SELECT * FROM sessions
            ORDER BY start_ts
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|session| session.into())
        .collect()
    }

    async fn find_by_starting_between(&self, start: i64, end: i64) -> Vec<Session> {
        sqlx::query_as::<_, SessionRaw>(
            r#"
            SELECT * FROM sessions
            WHERE start_ts >= $1 AND start_ts <= $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|session| session.into())
        .collect()
    }

    async fn delete(&self, session_id: &ID) -> Option<Session> {
        sqlx::query_as::<_, SessionRaw>(
            r#"
            DELETE FROM sessions
            WHERE session_uid = $1
            RETURNING *
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|session| session.into())
    }
}
