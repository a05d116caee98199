use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{config::SmtpConfig, domain::AdminContact, error::MailError};

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message addressed to every recipient.
    async fn send_mail(
        &self,
        subject: &str,
        body: &str,
        recipients: &[AdminContact],
    ) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|err| MailError::Address {
                address: config.from.clone(),
                reason: err.to_string(),
            })?;

        let transport = match &config.credentials {
            Some((username, password)) => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|err| MailError::Delivery(err.to_string()))?
                    .port(config.port)
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .timeout(Some(SMTP_TIMEOUT))
                    .build()
            }
            None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .timeout(Some(SMTP_TIMEOUT))
                .build(),
        };

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_mail(
        &self,
        subject: &str,
        body: &str,
        recipients: &[AdminContact],
    ) -> Result<(), MailError> {
        let message = build_message(&self.from, subject, body, recipients)?;
        self.transport
            .send(message)
            .await
            .map_err(|err| MailError::Delivery(err.to_string()))?;
        tracing::info!(target: "mail", recipients = recipients.len(), "notification mail sent");
        Ok(())
    }
}

fn build_message(
    from: &Mailbox,
    subject: &str,
    body: &str,
    recipients: &[AdminContact],
) -> Result<Message, MailError> {
    if recipients.is_empty() {
        return Err(MailError::NoRecipients);
    }

    let mut builder = Message::builder().from(from.clone()).subject(subject);
    for contact in recipients {
        let address = contact
            .email
            .parse::<Address>()
            .map_err(|err| MailError::Address {
                address: contact.email.clone(),
                reason: err.to_string(),
            })?;
        builder = builder.to(Mailbox::new(Some(contact.name.clone()), address));
    }

    builder
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|err| MailError::Build(err.to_string()))
}
