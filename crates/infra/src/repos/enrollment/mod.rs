mod inmemory;
mod postgres;

use attenda_domain::{Enrollment, ID};
pub use inmemory::InMemoryEnrollmentRepo;
pub use postgres::PostgresEnrollmentRepo;

use super::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IEnrollmentRepo: Send + Sync {
    async fn insert(&self, enrollment: &Enrollment) -> anyhow::Result<()>;
    async fn save(&self, enrollment: &Enrollment) -> anyhow::Result<()>;
    async fn find(&self, enrollment_id: &ID) -> Option<Enrollment>;
    /// Active enrollments only, the reminder audience for a session.
    async fn find_by_session(&self, session_id: &ID) -> Vec<Enrollment>;
    async fn find_by_session_and_user(&self, session_id: &ID, user_id: &ID)
        -> Option<Enrollment>;
    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult;
    async fn delete_by_user(&self, user_id: &ID) -> DeleteResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_context;
    use attenda_domain::EnrollmentStatus;

    #[tokio::test]
    async fn active_enrollments_by_session() {
        let ctx = setup_context().await;

        let session_id = ID::new();
        let mut first = Enrollment::new(session_id.clone(), ID::new(), 0);
        let second = Enrollment::new(session_id.clone(), ID::new(), 0);
        let unrelated = Enrollment::new(ID::new(), ID::new(), 0);
        for enrollment in [&first, &second, &unrelated] {
            ctx.repos
                .enrollments
                .insert(enrollment)
                .await
                .expect("To insert enrollment");
        }

        assert_eq!(ctx.repos.enrollments.find_by_session(&session_id).await.len(), 2);

        first.status = EnrollmentStatus::Cancelled;
        ctx.repos
            .enrollments
            .save(&first)
            .await
            .expect("To save enrollment");
        assert_eq!(ctx.repos.enrollments.find_by_session(&session_id).await.len(), 1);

        let found = ctx
            .repos
            .enrollments
            .find_by_session_and_user(&session_id, &second.user_id)
            .await;
        assert_eq!(found.map(|e| e.id), Some(second.id));

        let result = ctx.repos.enrollments.delete_by_session(&session_id).await;
        assert_eq!(result.deleted_count, 2);
    }
}
