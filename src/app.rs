use std::sync::Arc;

use anyhow::{Context, Result};

use crate::{
    admin::{AdminNotifier, JsonFileDirectory},
    akismet::{AkismetClient, HttpTransport},
    config::AppConfig,
    filter::SpamFilter,
    host::AkismetPlugin,
    infrastructure::{diagnostics::TracingDiagnostics, mailer::SmtpMailer},
    options::{MemoryOptionStore, AKISMET_KEY_OPTION},
};

/// Wires the plugin against real collaborators: reqwest for Akismet, SMTP
/// for admin mail, a JSON file as the administrator directory.
pub fn initialize(config: &AppConfig) -> Result<AkismetPlugin> {
    let options = Arc::new(MemoryOptionStore::new());
    if !config.akismet_key.is_empty() {
        options.set_option(AKISMET_KEY_OPTION, config.akismet_key.clone());
    }

    let transport = HttpTransport::from_config(&config.akismet)
        .context("failed to build Akismet HTTP client")?;
    let client = AkismetClient::new(Arc::new(transport), config.akismet.service_host.clone());

    let mailer = SmtpMailer::from_config(&config.smtp).context("failed to set up SMTP mailer")?;
    let diagnostics = Arc::new(TracingDiagnostics);
    let notifier = AdminNotifier::new(
        Arc::new(JsonFileDirectory::new(&config.admins_file)),
        Arc::new(mailer),
        diagnostics.clone(),
        &config.site.name,
    )
    .with_timezone(&config.timezone);

    let filter = SpamFilter::new(
        client,
        options,
        config.site.base_url.as_str(),
        Arc::new(notifier),
        diagnostics.clone(),
    );

    tracing::info!(
        target: "akismet",
        service_host = %config.akismet.service_host,
        site = %config.site.base_url,
        key_configured = !config.akismet_key.is_empty(),
        "akismet plugin initialized"
    );
    Ok(AkismetPlugin::new(filter, diagnostics))
}
