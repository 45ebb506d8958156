mod config;
mod repos;
mod services;
mod system;

pub use config::{BatchConfig, Config, MailerConfig};
use repos::Repos;
pub use repos::DeleteResult;
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct AttendaContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

/// Will setup the infrastructure context given the environment. Postgres
/// backed repos when `DATABASE_URL` is set, plain in-memory repos otherwise,
/// which is what the test suite runs on.
pub async fn setup_context() -> AttendaContext {
    let config = Config::new();
    let repos = match psql_connection_string() {
        Some(connection_string) => Repos::create_postgres(&connection_string)
            .await
            .expect("Postgres credentials must be valid when DATABASE_URL is set"),
        None => {
            info!("DATABASE_URL not set, using in-memory repositories");
            Repos::create_inmemory()
        }
    };
    let mailer = create_mailer(&config.mailer);
    AttendaContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
        mailer,
    }
}

fn psql_connection_string() -> Option<String> {
    std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty())
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match psql_connection_string() {
        Some(connection_string) => connection_string,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
