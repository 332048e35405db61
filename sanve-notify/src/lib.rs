pub mod mailer;
pub mod templates;

use std::sync::Arc;

use tracing::warn;

use sanve_domain::repository::SettingsRepository;

pub use mailer::{send_mail, MailError, MailMessage, SmtpSettings};
pub use templates::{ConfirmationEmail, SuccessEmail};

/// SMTP endpoint from application config; credentials live in storage and
/// are re-read per send.
#[derive(Debug, Clone)]
pub struct MailerOptions {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender_name: String,
}

/// Best-effort email dispatcher. Every send runs on a background task; a
/// failure is logged and never reaches the caller, so a slow or broken
/// transport cannot fail a booking or a status change.
pub struct Notifier {
    settings: Arc<dyn SettingsRepository>,
    options: MailerOptions,
}

impl Notifier {
    pub fn new(settings: Arc<dyn SettingsRepository>, options: MailerOptions) -> Self {
        Self { settings, options }
    }

    pub fn dispatch_booking_created(&self, email: ConfirmationEmail) {
        let message = MailMessage {
            to: email.to.clone(),
            subject: templates::CONFIRMATION_SUBJECT.to_string(),
            html: templates::render_confirmation(&email),
        };
        self.dispatch(message);
    }

    pub fn dispatch_booking_succeeded(&self, email: SuccessEmail) {
        let message = MailMessage {
            to: email.to.clone(),
            subject: templates::SUCCESS_SUBJECT.to_string(),
            html: templates::render_success(&email),
        };
        self.dispatch(message);
    }

    fn dispatch(&self, message: MailMessage) {
        let settings = self.settings.clone();
        let options = self.options.clone();
        tokio::spawn(async move {
            if let Err(e) = Self::send(settings, options, message).await {
                warn!("Email delivery failed: {}", e);
            }
        });
    }

    async fn send(
        settings: Arc<dyn SettingsRepository>,
        options: MailerOptions,
        message: MailMessage,
    ) -> Result<(), MailError> {
        // Credentials are read fresh for every send so a rotation through the
        // admin surface takes effect without a restart.
        let credentials = settings
            .smtp_credentials()
            .await
            .map_err(|e| MailError::Settings(e.to_string()))?;

        let smtp = SmtpSettings {
            host: options.smtp_host,
            port: options.smtp_port,
            sender_name: options.sender_name,
            email: credentials.email,
            password: credentials.password,
        };

        send_mail(&smtp, message).await
    }
}
