use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use attenda_domain::{User, ID};
use std::sync::Mutex;

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_many(&self, user_ids: &[ID]) -> Vec<User> {
        find_by(&self.users, |user| user_ids.contains(&user.id))
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        find_by(&self.users, |user| user.email.eq_ignore_ascii_case(email))
            .into_iter()
            .next()
    }

    async fn find_all(&self) -> Vec<User> {
        find_by(&self.users, |_| true)
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        delete(user_id, &self.users)
    }
}
