use crate::config::MailerConfig;
use attenda_domain::SessionReminderDetails;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct EmailReceipt {
    /// Message id assigned by the email provider, when it returned one
    pub message_id: Option<String>,
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send_session_reminder(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        session: &SessionReminderDetails,
    ) -> anyhow::Result<EmailReceipt>;
}

/// Picks the mailer for the given configuration. Without provider
/// credentials every send becomes a log line, which keeps local runs and
/// tests from needing an email account.
pub fn create_mailer(config: &MailerConfig) -> Arc<dyn IMailer> {
    match (&config.api_url, &config.api_key) {
        (Some(api_url), Some(api_key)) => Arc::new(RestMailer::new(
            api_url.clone(),
            api_key.clone(),
            config.from.clone(),
        )),
        _ => {
            info!("Email provider not configured, reminder emails will only be logged");
            Arc::new(NoopMailer {})
        }
    }
}

pub struct RestMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl RestMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    to_name: &'a str,
    subject: &'a str,
    session: &'a SessionReminderDetails,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[async_trait::async_trait]
impl IMailer for RestMailer {
    async fn send_session_reminder(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        session: &SessionReminderDetails,
    ) -> anyhow::Result<EmailReceipt> {
        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: to_email,
                to_name,
                subject,
                session,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            warn!(
                "Email provider rejected reminder to {} with status {}",
                to_email, status
            );
            return Err(anyhow::anyhow!(
                "email provider returned status {}",
                status
            ));
        }

        let body = res
            .json::<SendEmailResponse>()
            .await
            .unwrap_or(SendEmailResponse { id: None });
        Ok(EmailReceipt {
            message_id: body.id,
        })
    }
}

/// Mailer used when no provider is configured. Logs and reports success.
pub struct NoopMailer {}

#[async_trait::async_trait]
impl IMailer for NoopMailer {
    async fn send_session_reminder(
        &self,
        to_email: &str,
        _to_name: &str,
        subject: &str,
        session: &SessionReminderDetails,
    ) -> anyhow::Result<EmailReceipt> {
        info!(
            "Would send reminder \"{}\" for session {} to {}",
            subject, session.id, to_email
        );
        Ok(EmailReceipt { message_id: None })
    }
}

#[derive(Debug, Clone)]
pub struct RecordedEmail {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub session_title: String,
}

/// Test double recording every send. Individual recipients can be made to
/// fail delivery.
pub struct InMemoryMailer {
    pub sent: Mutex<Vec<RecordedEmail>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_delivery_to(&self, email: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(email.to_string());
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send_session_reminder(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        session: &SessionReminderDetails,
    ) -> anyhow::Result<EmailReceipt> {
        let failing = self.failing_recipients.lock().unwrap();
        if failing.iter().any(|email| email == to_email) {
            return Err(anyhow::anyhow!("delivery to {} refused", to_email));
        }
        drop(failing);

        let mut sent = self.sent.lock().unwrap();
        sent.push(RecordedEmail {
            to_email: to_email.to_string(),
            to_name: to_name.to_string(),
            subject: subject.to_string(),
            session_title: session.title.clone(),
        });
        Ok(EmailReceipt {
            message_id: Some(format!("mem-{}", sent.len())),
        })
    }
}
