use super::IEnrollmentRepo;
use crate::repos::shared::repo::DeleteResult;
use attenda_domain::{Enrollment, EnrollmentStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresEnrollmentRepo {
    pool: PgPool,
}

impl PostgresEnrollmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EnrollmentRaw {
    enrollment_uid: Uuid,
    session_uid: Uuid,
    user_uid: Uuid,
    status: String,
    created: i64,
}

impl From<EnrollmentRaw> for Enrollment {
    fn from(raw: EnrollmentRaw) -> Self {
        Self {
            id: raw.enrollment_uid.into(),
            session_id: raw.session_uid.into(),
            user_id: raw.user_uid.into(),
            status: EnrollmentStatus::from_str(&raw.status),
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IEnrollmentRepo for PostgresEnrollmentRepo {
    async fn insert(&self, enrollment: &Enrollment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO enrollments(enrollment_uid, session_uid, user_uid, status, created)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(enrollment.id.inner_ref())
        .bind(enrollment.session_id.inner_ref())
        .bind(enrollment.user_id.inner_ref())
        .bind(enrollment.status.as_str())
        .bind(enrollment.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, enrollment: &Enrollment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE enrollments
            SET status = $2
            WHERE enrollment_uid = $1
            "#,
        )
        .bind(enrollment.id.inner_ref())
        .bind(enrollment.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, enrollment_id: &ID) -> Option<Enrollment> {
        sqlx::query_as::<_, EnrollmentRaw>(
            r#"
            SELECT * FROM enrollments
            WHERE enrollment_uid = $1
            "#,
        )
        .bind(enrollment_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|enrollment| enrollment.into())
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<Enrollment> {
        sqlx::query_as::<_, EnrollmentRaw>(
            r#"
            SELECT * FROM enrollments
            WHERE session_uid = $1 AND status = 'active'
            "#,
        )
        .bind(session_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|enrollment| enrollment.into())
        .collect()
    }

    async fn find_by_session_and_user(
        &self,
        session_id: &ID,
        user_id: &ID,
    ) -> Option<Enrollment> {
        sqlx::query_as::<_, EnrollmentRaw>(
            r#"
            SELECT * FROM enrollments
            WHERE session_uid = $1 AND user_uid = $2
            "#,
        )
        .bind(session_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|enrollment| enrollment.into())
    }

    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult {
        let deleted_count = sqlx::query(
            r#"
            DELETE FROM enrollments
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
            DELETE FROM enrollments
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
