mod inmemory;
mod postgres;

use attenda_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_many(&self, user_ids: &[ID]) -> Vec<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn find_all(&self) -> Vec<User>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_context;

    #[tokio::test]
    async fn crud_and_email_lookup() {
        let ctx = setup_context().await;

        let mut user = User::new("ada@example.com", "Ada Lovelace", 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let by_email = ctx.repos.users.find_by_email("ADA@example.com").await;
        assert_eq!(by_email.map(|u| u.id), Some(user.id.clone()));
        assert!(ctx.repos.users.find_by_email("unknown@example.com").await.is_none());

        user.preferences.session_reminders = false;
        user.preferences.disable("remind_day_before");
        ctx.repos.users.save(&user).await.expect("To save user");
        let found = ctx.repos.users.find(&user.id).await.unwrap();
        assert!(!found.preferences.session_reminders);
        assert_eq!(found.preferences.disabled_keys, vec!["remind_day_before"]);

        assert!(ctx.repos.users.delete(&user.id).await.is_some());
        assert!(ctx.repos.users.find(&user.id).await.is_none());
    }
}
