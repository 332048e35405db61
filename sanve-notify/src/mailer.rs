use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mail message: {0}")]
    Message(String),
    #[error("smtp transport error: {0}")]
    Transport(String),
    #[error("smtp settings unavailable: {0}")]
    Settings(String),
}

/// Everything a single send needs: the transport endpoint from application
/// config plus the credential row read from storage just before the send.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub sender_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Sends one message over a transport built from the given settings. No
/// shared transport state: a credential rotation is picked up by the next
/// call without a restart.
pub async fn send_mail(settings: &SmtpSettings, message: MailMessage) -> Result<(), MailError> {
    let from = format!("{} <{}>", settings.sender_name, settings.email);

    let email = Message::builder()
        .from(from
            .parse()
            .map_err(|e| MailError::Message(format!("invalid from address: {e}")))?)
        .to(message
            .to
            .parse()
            .map_err(|e| MailError::Message(format!("invalid to address: {e}")))?)
        .subject(message.subject)
        .header(ContentType::TEXT_HTML)
        .body(message.html)
        .map_err(|e| MailError::Message(format!("failed to build email: {e}")))?;

    let mailer = SmtpTransport::relay(&settings.host)
        .map_err(|e| MailError::Transport(format!("smtp relay error: {e}")))?
        .port(settings.port)
        .credentials(Credentials::new(
            settings.email.clone(),
            settings.password.clone(),
        ))
        .build();

    tokio::task::spawn_blocking(move || {
        mailer
            .send(&email)
            .map(|_| ())
            .map_err(|e| MailError::Transport(format!("failed to send email: {e}")))
    })
    .await
    .map_err(|e| MailError::Transport(format!("email task failed: {e}")))?
}
