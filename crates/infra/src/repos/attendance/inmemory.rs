use super::IAttendanceRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use attenda_domain::{SessionAttendance, ID};
use std::sync::Mutex;

pub struct InMemoryAttendanceRepo {
    records: Mutex<Vec<SessionAttendance>>,
}

impl InMemoryAttendanceRepo {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAttendanceRepo for InMemoryAttendanceRepo {
    async fn insert(&self, attendance: &SessionAttendance) -> anyhow::Result<()> {
        insert(attendance, &self.records);
        Ok(())
    }

    async fn save(&self, attendance: &SessionAttendance) -> anyhow::Result<()> {
        save(attendance, &self.records);
        Ok(())
    }

    async fn find(&self, attendance_id: &ID) -> Option<SessionAttendance> {
        find(attendance_id, &self.records)
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<SessionAttendance> {
        find_by(&self.records, |record| record.session_id == *session_id)
    }

    async fn find_by_session_and_user(
        &self,
        session_id: &ID,
        user_id: &ID,
    ) -> Option<SessionAttendance> {
        find_by(&self.records, |record| {
            record.session_id == *session_id && record.user_id == *user_id
        })
        .into_iter()
        .next()
    }

    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult {
        delete_by(&self.records, |record| record.session_id == *session_id)
    }
}
