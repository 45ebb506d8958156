mod inmemory;
mod postgres;

use attenda_domain::{ReminderConfiguration, ID};
pub use inmemory::InMemoryReminderConfigRepo;
pub use postgres::PostgresReminderConfigRepo;

#[async_trait::async_trait]
pub trait IReminderConfigRepo: Send + Sync {
    async fn insert(&self, config: &ReminderConfiguration) -> anyhow::Result<()>;
    async fn save(&self, config: &ReminderConfiguration) -> anyhow::Result<()>;
    async fn find(&self, config_id: &ID) -> Option<ReminderConfiguration>;
    async fn find_by_type(&self, reminder_type: &str) -> Option<ReminderConfiguration>;
    /// Enabled configurations in sort order, the sweep's work list.
    async fn find_enabled(&self) -> Vec<ReminderConfiguration>;
    async fn find_all(&self) -> Vec<ReminderConfiguration>;
    async fn delete(&self, config_id: &ID) -> Option<ReminderConfiguration>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_context;

    fn config(reminder_type: &str, sort_order: i64, is_enabled: bool) -> ReminderConfiguration {
        ReminderConfiguration {
            id: Default::default(),
            reminder_type: reminder_type.to_string(),
            minutes_before: 30,
            is_enabled,
            email_subject_template: "Reminder: {session_title}".into(),
            display_name: reminder_type.to_string(),
            sort_order,
        }
    }

    #[tokio::test]
    async fn enabled_configs_come_back_sorted() {
        let ctx = setup_context().await;

        for config in [
            config("1h", 2, true),
            config("24h", 1, true),
            config("start", 3, false),
        ] {
            ctx.repos
                .reminder_configs
                .insert(&config)
                .await
                .expect("To insert reminder config");
        }

        let enabled = ctx.repos.reminder_configs.find_enabled().await;
        assert_eq!(enabled.len(), 2);
        assert_eq!(enabled[0].reminder_type, "24h");
        assert_eq!(enabled[1].reminder_type, "1h");

        assert_eq!(ctx.repos.reminder_configs.find_all().await.len(), 3);
        assert!(ctx.repos.reminder_configs.find_by_type("start").await.is_some());
        assert!(ctx.repos.reminder_configs.find_by_type("2h").await.is_none());
    }
}
