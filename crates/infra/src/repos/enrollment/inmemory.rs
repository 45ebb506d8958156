use super::IEnrollmentRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use attenda_domain::{Enrollment, EnrollmentStatus, ID};
use std::sync::Mutex;

pub struct InMemoryEnrollmentRepo {
    enrollments: Mutex<Vec<Enrollment>>,
}

impl InMemoryEnrollmentRepo {
    pub fn new() -> Self {
        Self {
            enrollments: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEnrollmentRepo for InMemoryEnrollmentRepo {
    async fn insert(&self, enrollment: &Enrollment) -> anyhow::Result<()> {
        insert(enrollment, &self.enrollments);
        Ok(())
    }

    async fn save(&self, enrollment: &Enrollment) -> anyhow::Result<()> {
        save(enrollment, &self.enrollments);
        Ok(())
    }

    async fn find(&self, enrollment_id: &ID) -> Option<Enrollment> {
        find(enrollment_id, &self.enrollments)
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<Enrollment> {
        find_by(&self.enrollments, |enrollment| {
            enrollment.session_id == *session_id && enrollment.status == EnrollmentStatus::Active
        })
    }

    async fn find_by_session_and_user(
        &self,
        session_id: &ID,
        user_id: &ID,
    ) -> Option<Enrollment> {
        find_by(&self.enrollments, |enrollment| {
            enrollment.session_id == *session_id && enrollment.user_id == *user_id
        })
        .into_iter()
        .next()
    }

    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult {
        delete_by(&self.enrollments, |enrollment| {
            enrollment.session_id == *session_id
        })
    }

    async fn delete_by_user(&self, user_id: &ID) -> DeleteResult {
        delete_by(&self.enrollments, |enrollment| {
            enrollment.user_id == *user_id
        })
    }
}
