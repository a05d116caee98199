use std::sync::Arc;

use crate::{
    domain::{CommentSubmission, CommentTarget},
    error::FilterError,
    filter::SpamFilter,
    infrastructure::diagnostics::Diagnostics,
    options::{supported_options, OptionDescriptor},
};

/// Headers of the request that carried the comment, when the host has them.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// The spam-filter extension points as the host calls them.
pub struct AkismetPlugin {
    filter: SpamFilter,
    diagnostics: Arc<dyn Diagnostics>,
}

impl AkismetPlugin {
    pub fn new(filter: SpamFilter, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            filter,
            diagnostics,
        }
    }

    pub fn filter(&self) -> &SpamFilter {
        &self.filter
    }

    pub fn options_supported(&self) -> Vec<OptionDescriptor> {
        supported_options()
    }

    /// Renders custom option kinds. The plugin declares none yet.
    pub fn handle_option(&self, _option: &str, _current_value: &str) {}

    /// Returns 0 for spam, 1 for possible spam, 2 for a clean comment.
    /// Integration errors are reported through the fatal channel first.
    #[allow(clippy::too_many_arguments)]
    pub async fn filter_message(
        &self,
        author: &str,
        email: &str,
        website: &str,
        body: &str,
        receiver: &dyn CommentTarget,
        ip: &str,
        headers: RequestHeaders,
    ) -> Result<i32, FilterError> {
        let submission = CommentSubmission {
            author: author.to_string(),
            email: email.to_string(),
            website: website.to_string(),
            body: body.to_string(),
            submitter_ip: ip.to_string(),
            user_agent: headers.user_agent,
            referrer: headers.referrer,
        };

        match self.filter.classify(&submission, receiver).await {
            Ok(verdict) => Ok(verdict.host_code()),
            Err(err) => {
                self.diagnostics.fatal(&err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        admin::AdminNotifier,
        akismet::AkismetClient,
        domain::ContentObject,
        options::{MemoryOptionStore, OptionStore, AKISMET_KEY_OPTION},
        testing::{FakeTransport, RecordingDiagnostics, RecordingMailer, StaticDirectory},
    };

    fn plugin(store: Arc<MemoryOptionStore>, body: &str) -> (AkismetPlugin, Arc<RecordingDiagnostics>) {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let notifier = Arc::new(AdminNotifier::new(
            Arc::new(StaticDirectory::new(Vec::new())),
            Arc::new(RecordingMailer::new()),
            diagnostics.clone(),
            "Gallery",
        ));
        let filter = SpamFilter::new(
            AkismetClient::new(Arc::new(FakeTransport::respond(200, body)), "rest.akismet.com"),
            store,
            "http://gallery.example.com",
            notifier,
            diagnostics.clone(),
        );
        (AkismetPlugin::new(filter, diagnostics.clone()), diagnostics)
    }

    #[test]
    fn construction_registers_empty_key_default() {
        let store = Arc::new(MemoryOptionStore::new());
        let (plugin, _) = plugin(store.clone(), "false");
        assert_eq!(store.get_option(AKISMET_KEY_OPTION).as_deref(), Some(""));
        assert_eq!(plugin.filter().api_key(), "");
        assert_eq!(plugin.options_supported()[0].key, AKISMET_KEY_OPTION);
    }

    #[tokio::test]
    async fn verdicts_are_encoded_for_the_host() {
        let store = Arc::new(MemoryOptionStore::new());
        store.set_option(AKISMET_KEY_OPTION, "abc123");
        let image = ContentObject::Image { link: "/a.jpg".into() };

        let (spam, _) = plugin(store.clone(), "true");
        let code = spam
            .filter_message("a", "e", "w", "b", &image, "192.0.2.1", RequestHeaders::default())
            .await
            .unwrap();
        assert_eq!(code, 0);

        let (ham, _) = plugin(store.clone(), "false");
        let code = ham
            .filter_message("a", "e", "w", "b", &image, "192.0.2.1", RequestHeaders::default())
            .await
            .unwrap();
        assert_eq!(code, 2);

        let (odd, _) = plugin(store, "maybe");
        let code = odd
            .filter_message("a", "e", "w", "b", &image, "192.0.2.1", RequestHeaders::default())
            .await
            .unwrap();
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn configuration_errors_go_through_fatal_channel() {
        let store = Arc::new(MemoryOptionStore::new());
        let (plugin, diagnostics) = plugin(store, "false");
        let image = ContentObject::Image { link: "/a.jpg".into() };

        let result = plugin
            .filter_message("a", "e", "w", "b", &image, "192.0.2.1", RequestHeaders::default())
            .await;

        assert!(matches!(result, Err(FilterError::MissingApiKey)));
        let fatals = diagnostics.fatals();
        assert_eq!(fatals.len(), 1);
        assert!(fatals[0].contains("API key"));
    }
}
