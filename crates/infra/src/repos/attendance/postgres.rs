use super::IAttendanceRepo;
use crate::repos::shared::repo::DeleteResult;
use attenda_domain::{AttendanceSource, AttendanceStatus, SessionAttendance, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAttendanceRepo {
    pool: PgPool,
}

impl PostgresAttendanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AttendanceRaw {
    attendance_uid: Uuid,
    session_uid: Uuid,
    user_uid: Uuid,
    check_in_time: i64,
    join_time: i64,
    leave_time: Option<i64>,
    duration_minutes: i64,
    is_eligible_for_certificate: bool,
    attendance_source: String,
    status: String,
    approved_by: Option<Uuid>,
    approved_at: Option<i64>,
    notes: Option<String>,
}

impl From<AttendanceRaw> for SessionAttendance {
    fn from(raw: AttendanceRaw) -> Self {
        Self {
            id: raw.attendance_uid.into(),
            session_id: raw.session_uid.into(),
            user_id: raw.user_uid.into(),
            check_in_time: raw.check_in_time,
            join_time: raw.join_time,
            leave_time: raw.leave_time,
            duration_minutes: raw.duration_minutes,
            is_eligible_for_certificate: raw.is_eligible_for_certificate,
            attendance_source: AttendanceSource::from_str(&raw.attendance_source),
            status: AttendanceStatus::from_str(&raw.status),
            approved_by: raw.approved_by.map(|uid| uid.into()),
            approved_at: raw.approved_at,
            notes: raw.notes,
        }
    }
}

#[async_trait::async_trait]
impl IAttendanceRepo for PostgresAttendanceRepo {
    async fn insert(&self, attendance: &SessionAttendance) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session_attendance(attendance_uid, session_uid, user_uid,
                check_in_time, join_time, leave_time, duration_minutes,
                is_eligible_for_certificate, attendance_source, status,
                approved_by, approved_at, notes)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(attendance.id.inner_ref())
        .bind(attendance.session_id.inner_ref())
        .bind(attendance.user_id.inner_ref())
        .bind(attendance.check_in_time)
        .bind(attendance.join_time)
        .bind(attendance.leave_time)
        .bind(attendance.duration_minutes)
        .bind(attendance.is_eligible_for_certificate)
        .bind(attendance.attendance_source.as_str())
        .bind(attendance.status.as_str())
        .bind(attendance.approved_by.as_ref().map(|id| *id.inner_ref()))
        .bind(attendance.approved_at)
        .bind(&attendance.notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, attendance: &SessionAttendance) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE session_attendance
            SET check_in_time = $2,
                join_time = $3,
                leave_time = $4,
                duration_minutes = $5,
                is_eligible_for_certificate = $6,
                attendance_source = $7,
                status = $8,
                approved_by = $9,
                approved_at = $10,
                notes = $11
            WHERE attendance_uid = $1
            "#,
        )
        .bind(attendance.id.inner_ref())
        .bind(attendance.check_in_time)
        .bind(attendance.join_time)
        .bind(attendance.leave_time)
        .bind(attendance.duration_minutes)
        .bind(attendance.is_eligible_for_certificate)
        .bind(attendance.attendance_source.as_str())
        .bind(attendance.status.as_str())
        .bind(attendance.approved_by.as_ref().map(|id| *id.inner_ref()))
        .bind(attendance.approved_at)
        .bind(&attendance.notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, attendance_id: &ID) -> Option<SessionAttendance> {
        sqlx::query_as::<_, AttendanceRaw>(
            r#"
            SELECT * FROM session_attendance
            WHERE attendance_uid = $1
            "#,
        )
        .bind(attendance_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|attendance| attendance.into())
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<SessionAttendance> {
        sqlx::query_as::<_, AttendanceRaw>(
            r#"
            SELECT * FROM session_attendance
            WHERE session_uid = $1
            ORDER BY check_in_time
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|attendance| attendance.into())
        .collect()
    }

    async fn find_by_session_and_user(
        &self,
        session_id: &ID,
        user_id: &ID,
    ) -> Option<SessionAttendance> {
        sqlx::query_as::<_, AttendanceRaw>(
            r#"
            SELECT * FROM session_attendance
            WHERE session_uid = $1 AND user_uid = $2
            "#,
        )
        .bind(session_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|attendance| attendance.into())
    }

    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult {
        let deleted_count = sqlx::query(
            r#"
            DELETE FROM session_attendance
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
}
