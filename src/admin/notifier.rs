use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    domain::{AdminContact, AdminEntry},
    infrastructure::{diagnostics::Diagnostics, mailer::Mailer},
};

use super::directory::AdminDirectory;

const BODY_PREAMBLE: &str =
    "The Akismet spam-filtering plugin was unable to classify a message because of the following error:";

/// Mails every administrator about a classification failure. Never fails
/// outward; delivery problems go to the diagnostics log.
pub struct AdminNotifier {
    directory: Arc<dyn AdminDirectory>,
    mailer: Arc<dyn Mailer>,
    diagnostics: Arc<dyn Diagnostics>,
    subject: String,
    timezone: Tz,
}

impl AdminNotifier {
    pub fn new(
        directory: Arc<dyn AdminDirectory>,
        mailer: Arc<dyn Mailer>,
        diagnostics: Arc<dyn Diagnostics>,
        site_name: &str,
    ) -> Self {
        Self {
            directory,
            mailer,
            diagnostics,
            subject: format!("[{site_name}] Akismet Plugin Error"),
            timezone: Tz::UTC,
        }
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = timezone.parse().unwrap_or(Tz::UTC);
        self
    }

    pub async fn notify_admins(&self, message: &str) {
        let entries = match self.directory.administrators().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(target: "notifier", error = %err, "administrator lookup failed");
                self.diagnostics
                    .log(&format!("Akismet could not look up administrators: {err}"));
                return;
            }
        };

        let recipients = admin_recipients(&entries);
        let body = self.format_body(message, Utc::now());

        if let Err(err) = self.mailer.send_mail(&self.subject, &body, &recipients).await {
            tracing::error!(
                target: "notifier",
                error = %err,
                recipients = recipients.len(),
                "failed to alert administrators"
            );
            self.diagnostics.log(&format!(
                "The Akismet plugin encountered an error and failed to alert the admins about the error: {err}"
            ));
        }
    }

    fn format_body(&self, message: &str, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&self.timezone);
        format!(
            "{BODY_PREAMBLE}\n{message}\n\nOccurred at: {}\n",
            local.format("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Keeps entries with an email address and admin rights, one address per
/// display name.
pub fn admin_recipients(entries: &[AdminEntry]) -> Vec<AdminContact> {
    let mut recipients: Vec<AdminContact> = Vec::new();
    for contact in entries.iter().filter_map(AdminEntry::to_contact) {
        match recipients.iter_mut().find(|c| c.name == contact.name) {
            Some(existing) => existing.email = contact.email,
            None => recipients.push(contact),
        }
    }
    recipients
}
