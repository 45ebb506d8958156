mod mailer;
mod report_files;

pub use mailer::{
    create_mailer, EmailReceipt, IMailer, InMemoryMailer, NoopMailer, RecordedEmail, RestMailer,
};
pub use report_files::decode_report_bytes;
