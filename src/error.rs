use thiserror::Error;

/// Integration problems that leave no sensible verdict to return.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("The Akismet spam filter is enabled, but has not been configured with an API key.")]
    MissingApiKey,
    #[error("The Akismet spam filter is enabled, but does not support comments on {kind} objects.")]
    UnsupportedTarget { kind: String },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("could not connect: {0}")]
    Connect(String),
    #[error("transport failure: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address {address}: {reason}")]
    Address { address: String, reason: String },
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("mail delivery failed: {0}")]
    Delivery(String),
    #[error("no administrator has a mail address")]
    NoRecipients,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read administrator directory {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse administrator directory {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
