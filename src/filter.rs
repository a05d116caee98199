use std::sync::Arc;

use crate::{
    admin::AdminNotifier,
    akismet::{protocol::interpret_comment_check, AkismetClient, CheckOutcome, ClassificationRequest},
    domain::{CommentSubmission, CommentTarget, Verdict},
    error::FilterError,
    infrastructure::diagnostics::Diagnostics,
    options::{ApiKeySource, OptionStore},
};

const UNEXPECTED_RESPONSE: &str = "An unexpected response was received from the Akismet service:";

/// Classifies comments through Akismet.
///
/// Every service-level anomaly (unreachable host, non-200 status, payload other
/// than `true`/`false`) alerts the administrators and yields
/// [`Verdict::PossibleSpam`], so a broken filter neither lets spam through
/// unmoderated nor rejects a legitimate comment. Only integration problems
/// (no API key, a target without a permalink) surface as errors.
pub struct SpamFilter {
    client: AkismetClient,
    api_key: ApiKeySource,
    site_url: String,
    notifier: Arc<AdminNotifier>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SpamFilter {
    pub fn new(
        client: AkismetClient,
        options: Arc<dyn OptionStore>,
        site_url: impl Into<String>,
        notifier: Arc<AdminNotifier>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            client,
            api_key: ApiKeySource::register(options),
            site_url: site_url.into(),
            notifier,
            diagnostics,
        }
    }

    pub fn api_key(&self) -> String {
        self.api_key.api_key()
    }

    /// Checks the stored key against the service's `verify-key` method.
    pub async fn verify_key(&self) -> anyhow::Result<bool> {
        let key = self.api_key.api_key();
        if key.is_empty() {
            return Err(FilterError::MissingApiKey.into());
        }
        self.client.verify_key(&key, self.site_url.trim_end_matches('/')).await
    }

    pub async fn classify(
        &self,
        submission: &CommentSubmission,
        target: &dyn CommentTarget,
    ) -> Result<Verdict, FilterError> {
        let url = self.client.comment_check_endpoint(&self.api_key.api_key())?;
        let permalink_path =
            target
                .permalink_path()
                .ok_or_else(|| FilterError::UnsupportedTarget {
                    kind: target.kind().to_string(),
                })?;
        let request = ClassificationRequest::build(&self.site_url, &permalink_path, submission);

        let response = match self.client.comment_check(&url, &request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: "akismet",
                    error = %err,
                    user_ip = %submission.submitter_ip,
                    "comment-check call failed"
                );
                self.notifier.notify_admins(&err.to_string()).await;
                return Ok(Verdict::PossibleSpam);
            }
        };

        if response.status != 200 {
            tracing::warn!(
                target: "akismet",
                status = response.status,
                "comment-check returned a non-200 status"
            );
            self.notifier
                .notify_admins(&format!(
                    "{UNEXPECTED_RESPONSE}\nHTTP {}\n{}",
                    response.status, response.body
                ))
                .await;
            return Ok(Verdict::PossibleSpam);
        }

        let verdict = match interpret_comment_check(&response.body) {
            CheckOutcome::Spam => Verdict::Spam,
            CheckOutcome::Ham => Verdict::NotSpam,
            CheckOutcome::Unrecognized => {
                self.notifier
                    .notify_admins(&format!("{UNEXPECTED_RESPONSE}\n{}", response.body))
                    .await;
                self.diagnostics.fatal(&format!(
                    "Unexpected response from Akismet server: {}",
                    response.body
                ));
                Verdict::PossibleSpam
            }
        };

        tracing::info!(
            target: "akismet",
            verdict = ?verdict,
            user_ip = %submission.submitter_ip,
            permalink = %request.permalink,
            "comment classified"
        );
        Ok(verdict)
    }
}
