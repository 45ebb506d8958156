use super::IReminderConfigRepo;
use attenda_domain::{ReminderConfiguration, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderConfigRepo {
    pool: PgPool,
}

impl PostgresReminderConfigRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderConfigRaw {
    config_uid: Uuid,
    reminder_type: String,
    minutes_before: i64,
    is_enabled: bool,
    email_subject_template: String,
    display_name: String,
    sort_order: i64,
}

impl From<ReminderConfigRaw> for ReminderConfiguration {
    fn from(raw: ReminderConfigRaw) -> Self {
        Self {
            id: raw.config_uid.into(),
            reminder_type: raw.reminder_type,
            minutes_before: raw.minutes_before,
            is_enabled: raw.is_enabled,
            email_subject_template: raw.email_subject_template,
            display_name: raw.display_name,
            sort_order: raw.sort_order,
        }
    }
}

#[async_trait::async_trait]
impl IReminderConfigRepo for PostgresReminderConfigRepo {
    async fn insert(&self, config: &ReminderConfiguration) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_configs(config_uid, reminder_type, minutes_before,
                is_enabled, email_subject_template, display_name, sort_order)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(config.id.inner_ref())
        .bind(&config.reminder_type)
        .bind(config.minutes_before)
        .bind(config.is_enabled)
        .bind(&config.email_subject_template)
        .bind(&config.display_name)
        .bind(config.sort_order)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, config: &ReminderConfiguration) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_configs
            SET reminder_type = $2,
                minutes_before = $3,
                is_enabled = $4,
                email_subject_template = $5,
                display_name = $6,
                sort_order = $7
            WHERE config_uid = $1
            "#,
        )
        .bind(config.id.inner_ref())
        .bind(&config.reminder_type)
        .bind(config.minutes_before)
        .bind(config.is_enabled)
        .bind(&config.email_subject_template)
        .bind(&config.display_name)
        .bind(config.sort_order)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, config_id: &ID) -> Option<ReminderConfiguration> {
        sqlx::query_as::<_, ReminderConfigRaw>(
            r#"
            SELECT * FROM reminder_configs
            WHERE config_uid = $1
            "#,
        )
        .bind(config_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|config| config.into())
    }

    async fn find_by_type(&self, reminder_type: &str) -> Option<ReminderConfiguration> {
        sqlx::query_as::<_, ReminderConfigRaw>(
            r#"
            SELECT * FROM reminder_configs
            WHERE reminder_type = $1
            "#,
        )
        .bind(reminder_type)
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|config| config.into())
    }

    async fn find_enabled(&self) -> Vec<ReminderConfiguration> {
        sqlx::query_as::<_, ReminderConfigRaw>(
            r#"
            SELECT * FROM reminder_configs
            WHERE is_enabled = TRUE
            ORDER BY sort_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|config| config.into())
        .collect()
    }

    async fn find_all(&self) -> Vec<ReminderConfiguration> {
        sqlx::query_as::<_, ReminderConfigRaw>(
            r#"
            SELECT * FROM reminder_configs
            ORDER BY sort_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|config| config.into())
        .collect()
    }

    async fn delete(&self, config_id: &ID) -> Option<ReminderConfiguration> {
        sqlx::query_as::<_, ReminderConfigRaw>(
            r#"
            DELETE FROM reminder_configs
            WHERE config_uid = $1
            RETURNING *
            "#,
        )
        .bind(config_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|config| config.into())
    }
}
