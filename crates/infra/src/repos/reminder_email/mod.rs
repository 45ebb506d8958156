mod inmemory;
mod postgres;

use attenda_domain::{SessionReminderEmail, ID};
pub use inmemory::InMemoryReminderEmailRepo;
pub use postgres::PostgresReminderEmailRepo;

/// Idempotency ledger for reminder sends, keyed on
/// `(session_id, user_id, reminder_type)`. A row with any status counts as
/// already sent.
#[async_trait::async_trait]
pub trait IReminderEmailRepo: Send + Sync {
    /// Insert-or-ignore on the ledger key. Returns `false` when a row for
    /// the key already existed, which callers treat as "someone else sent
    /// this first".
    async fn insert(&self, email: &SessionReminderEmail) -> anyhow::Result<bool>;
    async fn is_sent(&self, session_id: &ID, user_id: &ID, reminder_type: &str) -> bool;
    /// The `(session_id, user_id)` pairs among `session_ids` that already
    /// have a ledger row for `reminder_type`. Batch pre-check for the
    /// dispatcher.
    async fn find_sent_keys(
        &self,
        session_ids: &[ID],
        reminder_type: &str,
    ) -> anyhow::Result<Vec<(ID, ID)>>;
    async fn find_by_session(&self, session_id: &ID) -> Vec<SessionReminderEmail>;
}
