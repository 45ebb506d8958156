use super::IReminderConfigRepo;
use crate::repos::shared::inmemory_repo::*;
use attenda_domain::{ReminderConfiguration, ID};
use std::sync::Mutex;

pub struct InMemoryReminderConfigRepo {
    configs: Mutex<Vec<ReminderConfiguration>>,
}

impl InMemoryReminderConfigRepo {
    pub fn new() -> Self {
        Self {
            configs: Mutex::new(Vec::new()),
        }
    }

    fn sorted(mut configs: Vec<ReminderConfiguration>) -> Vec<ReminderConfiguration> {
        configs.sort_by_key(|config| config.sort_order);
        configs
    }
}

#[async_trait::async_trait]
impl IReminderConfigRepo for InMemoryReminderConfigRepo {
    async fn insert(&self, config: &ReminderConfiguration) -> anyhow::Result<()> {
        insert(config, &self.configs);
        Ok(())
    }

    async fn save(&self, config: &ReminderConfiguration) -> anyhow::Result<()> {
        save(config, &self.configs);
        Ok(())
    }

    async fn find(&self, config_id: &ID) -> Option<ReminderConfiguration> {
        find(config_id, &self.configs)
    }

    async fn find_by_type(&self, reminder_type: &str) -> Option<ReminderConfiguration> {
        find_by(&self.configs, |config| config.reminder_type == reminder_type)
            .into_iter()
            .next()
    }

    async fn find_enabled(&self) -> Vec<ReminderConfiguration> {
        Self::sorted(find_by(&self.configs, |config| config.is_enabled))
    }

    async fn find_all(&self) -> Vec<ReminderConfiguration> {
        Self::sorted(find_by(&self.configs, |_| true))
    }

    async fn delete(&self, config_id: &ID) -> Option<ReminderConfiguration> {
        delete(config_id, &self.configs)
    }
}
