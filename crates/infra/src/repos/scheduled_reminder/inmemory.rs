use super::IScheduledReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use attenda_domain::{ScheduledReminder, ID};
use std::sync::Mutex;

pub struct InMemoryScheduledReminderRepo {
    reminders: Mutex<Vec<ScheduledReminder>>,
}

impl InMemoryScheduledReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledReminderRepo for InMemoryScheduledReminderRepo {
    async fn bulk_insert(&self, reminders: &[ScheduledReminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            insert(reminder, &self.reminders);
        }
        Ok(())
    }

    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledReminder> {
        find_and_delete_by(&self.reminders, |reminder| reminder.send_at <= before)
    }

    async fn delete_by_session(&self, session_id: &ID) -> DeleteResult {
        delete_by(&self.reminders, |reminder| {
            reminder.session_id == *session_id
        })
    }

    async fn delete_by_user(&self, user_id: &ID) -> DeleteResult {
        delete_by(&self.reminders, |reminder| reminder.user_id == *user_id)
    }
}
