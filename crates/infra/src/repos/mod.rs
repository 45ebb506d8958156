mod attendance;
mod enrollment;
mod reminder_config;
mod reminder_email;
mod scheduled_reminder;
mod session;
mod shared;
mod user;

use attendance::{IAttendanceRepo, InMemoryAttendanceRepo, PostgresAttendanceRepo};
use enrollment::{IEnrollmentRepo, InMemoryEnrollmentRepo, PostgresEnrollmentRepo};
use reminder_config::{IReminderConfigRepo, InMemoryReminderConfigRepo, PostgresReminderConfigRepo};
use reminder_email::{IReminderEmailRepo, InMemoryReminderEmailRepo, PostgresReminderEmailRepo};
use scheduled_reminder::{
    IScheduledReminderRepo, InMemoryScheduledReminderRepo, PostgresScheduledReminderRepo,
};
use session::{ISessionRepo, InMemorySessionRepo, PostgresSessionRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub sessions: Arc<dyn ISessionRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub enrollments: Arc<dyn IEnrollmentRepo>,
    pub reminder_configs: Arc<dyn IReminderConfigRepo>,
    pub reminder_emails: Arc<dyn IReminderEmailRepo>,
    pub scheduled_reminders: Arc<dyn IScheduledReminderRepo>,
    pub attendance: Arc<dyn IAttendanceRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            sessions: Arc::new(PostgresSessionRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            enrollments: Arc::new(PostgresEnrollmentRepo::new(pool.clone())),
            reminder_configs: Arc::new(PostgresReminderConfigRepo::new(pool.clone())),
            reminder_emails: Arc::new(PostgresReminderEmailRepo::new(pool.clone())),
            scheduled_reminders: Arc::new(PostgresScheduledReminderRepo::new(pool.clone())),
            attendance: Arc::new(PostgresAttendanceRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            sessions: Arc::new(InMemorySessionRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            enrollments: Arc::new(InMemoryEnrollmentRepo::new()),
            reminder_configs: Arc::new(InMemoryReminderConfigRepo::new()),
            reminder_emails: Arc::new(InMemoryReminderEmailRepo::new()),
            scheduled_reminders: Arc::new(InMemoryScheduledReminderRepo::new()),
            attendance: Arc::new(InMemoryAttendanceRepo::new()),
        }
    }
}
