use super::ISessionRepo;
use crate::repos::shared::inmemory_repo::*;
use attenda_domain::{Session, ID};
use std::sync::Mutex;

pub struct InMemorySessionRepo {
    sessions: Mutex<Vec<Session>>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISessionRepo for InMemorySessionRepo {
    async fn insert(&self, session: &Session) -> anyhow::Result<()> {
        insert(session, &self.sessions);
        Ok(())
    }

    async fn save(&self, session: &Session) -> anyhow::Result<()> {
        save(session, &self.sessions);
        Ok(())
    }

    async fn find(&self, session_id: &ID) -> Option<Session> {
        find(session_id, &self.sessions)
    }

    async fn find_many(&self, session_ids: &[ID]) -> Vec<Session> {
        find_by(&self.sessions, |session| {
            session_ids.contains(&session.id)
        })
    }

    async fn find_all(&self) -> Vec<Session> {
        find_by(&self.sessions, |_| true)
    }

    async fn find_by_starting_between(&self, start: i64, end: i64) -> Vec<Session> {
        find_by(&self.sessions, |session| {
            session.start_ts >= start && session.start_ts <= end
        })
    }

    async fn delete(&self, session_id: &ID) -> Option<Session> {
        delete(session_id, &self.sessions)
    }
}
