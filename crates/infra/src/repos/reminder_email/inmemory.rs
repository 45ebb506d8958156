use super::IReminderEmailRepo;
use attenda_domain::{SessionReminderEmail, ID};
use std::sync::Mutex;

pub struct InMemoryReminderEmailRepo {
    emails: Mutex<Vec<SessionReminderEmail>>,
}

impl InMemoryReminderEmailRepo {
    pub fn new() -> Self {
        Self {
            emails: Mutex::new(Vec::new()),
        }
    }
}

fn same_key(email: &SessionReminderEmail, session_id: &ID, user_id: &ID, reminder_type: &str) -> bool {
    email.session_id == *session_id
        && email.user_id == *user_id
        && email.reminder_type == reminder_type
}

#[async_trait::async_trait]
impl IReminderEmailRepo for InMemoryReminderEmailRepo {
    async fn insert(&self, email: &SessionReminderEmail) -> anyhow::Result<bool> {
        // Key check and push under one lock, matching the unique constraint
        let mut emails = self.emails.lock().unwrap();
        let exists = emails
            .iter()
            .any(|e| same_key(e, &email.session_id, &email.user_id, &email.reminder_type));
        if exists {
            return Ok(false);
        }
        emails.push(email.clone());
        Ok(true)
    }

    async fn is_sent(&self, session_id: &ID, user_id: &ID, reminder_type: &str) -> bool {
        let emails = self.emails.lock().unwrap();
        emails
            .iter()
            .any(|email| same_key(email, session_id, user_id, reminder_type))
    }

    async fn find_sent_keys(
        &self,
        session_ids: &[ID],
        reminder_type: &str,
    ) -> anyhow::Result<Vec<(ID, ID)>> {
        let emails = self.emails.lock().unwrap();
        Ok(emails
            .iter()
            .filter(|email| {
                email.reminder_type == reminder_type && session_ids.contains(&email.session_id)
            })
            .map(|email| (email.session_id.clone(), email.user_id.clone()))
            .collect())
    }

    async fn find_by_session(&self, session_id: &ID) -> Vec<SessionReminderEmail> {
        let emails = self.emails.lock().unwrap();
        emails
            .iter()
            .filter(|email| email.session_id == *session_id)
            .cloned()
            .collect()
    }
}
