use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the reminder sweep wakes up and looks for sessions whose
    /// start falls inside a configured send window
    pub sweep_interval_millis: i64,
    /// How often due scheduled reminders are claimed and dispatched
    pub drain_interval_millis: i64,
    pub batch: BatchConfig,
    pub mailer: MailerConfig,
}

/// Knobs for the batched reminder dispatcher.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub batch_size: usize,
    pub batch_delay_millis: u64,
    pub max_retries: u32,
    pub initial_backoff_millis: u64,
    pub max_backoff_millis: u64,
    pub backoff_multiplier: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay_millis: 1000,
            max_retries: 3,
            initial_backoff_millis: 500,
            max_backoff_millis: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
}

fn env_or<T: FromStr + std::fmt::Display>(var: &str, default: T) -> T {
    let raw = match std::env::var(var) {
        Ok(raw) => raw,
        Err(_) => return default,
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                var, raw, default
            );
            default
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            port: env_or("PORT", 5000),
            sweep_interval_millis: env_or("REMINDER_SWEEP_INTERVAL_MILLIS", 1000 * 60 * 15),
            drain_interval_millis: env_or("REMINDER_DRAIN_INTERVAL_MILLIS", 1000 * 60),
            batch: BatchConfig::from_env(),
            mailer: MailerConfig::from_env(),
        }
    }
}

impl BatchConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            batch_size: env_or("REMINDER_BATCH_SIZE", defaults.batch_size),
            batch_delay_millis: env_or("REMINDER_BATCH_DELAY_MILLIS", defaults.batch_delay_millis),
            max_retries: env_or("REMINDER_BATCH_MAX_RETRIES", defaults.max_retries),
            initial_backoff_millis: env_or(
                "REMINDER_BATCH_INITIAL_BACKOFF_MILLIS",
                defaults.initial_backoff_millis,
            ),
            max_backoff_millis: env_or(
                "REMINDER_BATCH_MAX_BACKOFF_MILLIS",
                defaults.max_backoff_millis,
            ),
            backoff_multiplier: env_or(
                "REMINDER_BATCH_BACKOFF_MULTIPLIER",
                defaults.backoff_multiplier,
            ),
        }
    }
}

impl MailerConfig {
    fn from_env() -> Self {
        Self {
            api_url: std::env::var("EMAIL_API_URL").ok().filter(|v| !v.is_empty()),
            api_key: std::env::var("EMAIL_API_KEY").ok().filter(|v| !v.is_empty()),
            from: std::env::var("EMAIL_FROM").unwrap_or_else(|_| "no-reply@attenda.app".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
