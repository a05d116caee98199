use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};

use crate::{config::AkismetConfig, error::FilterError, error::TransportError};

use super::protocol::{endpoint, interpret_verify_key, ClassificationRequest, Method};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, &str)],
    ) -> Result<RawResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Client builder carrying the connect and end-to-end timeouts.
    pub fn client_builder(config: &AkismetConfig) -> ClientBuilder {
        Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
    }

    pub fn from_config(config: &AkismetConfig) -> Result<Self> {
        let http = Self::client_builder(config).build()?;
        Ok(Self::new(http))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, &str)],
    ) -> Result<RawResponse, TransportError> {
        let response = self.http.post(url).form(fields).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[derive(Clone)]
pub struct AkismetClient {
    transport: Arc<dyn Transport>,
    service_host: String,
}

impl AkismetClient {
    pub fn new(transport: Arc<dyn Transport>, service_host: impl Into<String>) -> Self {
        Self {
            transport,
            service_host: service_host.into(),
        }
    }

    pub fn comment_check_endpoint(&self, api_key: &str) -> Result<String, FilterError> {
        endpoint(&self.service_host, Method::CommentCheck, api_key)
    }

    pub async fn comment_check(
        &self,
        url: &str,
        request: &ClassificationRequest,
    ) -> Result<RawResponse, TransportError> {
        self.transport.post_form(url, &request.form_fields()).await
    }

    /// Asks the service whether `api_key` is valid for `blog`.
    pub async fn verify_key(&self, api_key: &str, blog: &str) -> Result<bool> {
        let url = endpoint(&self.service_host, Method::VerifyKey, api_key)?;
        let response = self
            .transport
            .post_form(&url, &[("key", api_key), ("blog", blog)])
            .await?;
        if response.status != 200 {
            bail!(
                "verify-key returned HTTP {}: {}",
                response.status,
                response.body
            );
        }
        match interpret_verify_key(&response.body) {
            Some(valid) => Ok(valid),
            None => bail!("unexpected verify-key response: {}", response.body),
        }
    }
}
