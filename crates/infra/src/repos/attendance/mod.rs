mod inmemory;
mod postgres;

use attenda_domain::{SessionAttendance, ID};
pub use inmemory::InMemoryAttendanceRepo;
pub use postgres::PostgresAttendanceRepo;

use super::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IAttendanceRepo: Send + Sync {
    async fn insert(&self, attendance: &SessionAttendance) -> anyhow::Result<()>;
    async fn save(&self, attendance: &SessionAttendance) -> anyhow::Result<()>;
    async fn find(&self, attendance_id: &ID) -> Option<SessionAttendance>;
    async fn find_by_session(&self, session_id: &ID) -> Vec<SessionAttendance>;
    async fn find_by_session_and_user(
        &self,
        session_id: &ID,
        user_id: &ID,
    ) -> Option<SessionAttendance>;
    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult;
}
