/// Host error reporting.
pub trait Diagnostics: Send + Sync {
    /// Abort-worthy condition the host surfaces to visitors and admins.
    fn fatal(&self, message: &str);

    /// Non-fatal debug log entry.
    fn log(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn fatal(&self, message: &str) {
        tracing::error!(target: "akismet", fatal = true, "{message}");
    }

    fn log(&self, message: &str) {
        tracing::warn!(target: "akismet", "{message}");
    }
}
