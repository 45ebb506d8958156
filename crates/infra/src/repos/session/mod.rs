mod inmemory;
mod postgres;

use attenda_domain::{Session, ID};
pub use inmemory::InMemorySessionRepo;
pub use postgres::PostgresSessionRepo;

#[async_trait::async_trait]
pub trait ISessionRepo: Send + Sync {
    async fn insert(&self, session: &Session) -> anyhow::Result<()>;
    async fn save(&self, session: &Session) -> anyhow::Result<()>;
    async fn find(&self, session_id: &ID) -> Option<Session>;
    async fn find_many(&self, session_ids: &[ID]) -> Vec<Session>;
    async fn find_all(&self) -> Vec<Session>;
    /// Sessions whose start timestamp falls inside `[start, end]`, the
    /// reminder window query.
    async fn find_by_starting_between(&self, start: i64, end: i64) -> Vec<Session>;
    async fn delete(&self, session_id: &ID) -> Option<Session>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_context;
    use attenda_domain::SessionSettings;

    #[tokio::test]
    async fn crud_and_window_query() {
        let ctx = setup_context().await;

        let mut session = Session::new("Intro to Rust", 100_000, 0);
        ctx.repos
            .sessions
            .insert(&session)
            .await
            .expect("To insert session");

        let found = ctx.repos.sessions.find(&session.id).await;
        assert_eq!(found.map(|s| s.title), Some("Intro to Rust".to_string()));

        session.settings = SessionSettings {
            min_attendance_minutes: 45,
            use_percentage: true,
            attendance_percentage: 75,
        };
        session.duration_minutes = Some(90);
        ctx.repos
            .sessions
            .save(&session)
            .await
            .expect("To save session");
        let found = ctx.repos.sessions.find(&session.id).await.unwrap();
        assert_eq!(found.settings.attendance_percentage, 75);
        assert_eq!(found.duration_minutes, Some(90));

        let hits = ctx.repos.sessions.find_by_starting_between(50_000, 150_000).await;
        assert_eq!(hits.len(), 1);
        let misses = ctx.repos.sessions.find_by_starting_between(150_001, 200_000).await;
        assert!(misses.is_empty());

        assert!(ctx.repos.sessions.delete(&session.id).await.is_some());
        assert!(ctx.repos.sessions.find(&session.id).await.is_none());
    }
}
