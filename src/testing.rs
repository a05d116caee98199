//! In-memory collaborators for exercising the filter without a network,
//! a mail relay or a host application.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    admin::AdminDirectory,
    akismet::{RawResponse, Transport},
    domain::{AdminContact, AdminEntry},
    error::{DirectoryError, MailError, TransportError},
    infrastructure::{diagnostics::Diagnostics, mailer::Mailer},
};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub fields: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

type Responder = Box<dyn Fn(&RecordedCall) -> Result<RawResponse, TransportError> + Send + Sync>;

pub struct FakeTransport {
    responder: Responder,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> Result<RawResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::with_responder(move |_| {
            Ok(RawResponse {
                status,
                body: body.clone(),
            })
        })
    }

    pub fn fail<F>(error: F) -> Self
    where
        F: Fn() -> TransportError + Send + Sync + 'static,
    {
        Self::with_responder(move |_| Err(error()))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&'static str, &str)],
    ) -> Result<RawResponse, TransportError> {
        let call = RecordedCall {
            url: url.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        let result = (self.responder)(&call);
        self.calls.lock().push(call);
        result
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub subject: String,
    pub body: String,
    pub recipients: Vec<AdminContact>,
}

#[derive(Default)]
pub struct RecordingMailer {
    fail: bool,
    attempts: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every attempt and rejects it.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.lock().len()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_mail(
        &self,
        subject: &str,
        body: &str,
        recipients: &[AdminContact],
    ) -> Result<(), MailError> {
        self.attempts.lock().push(SentMail {
            subject: subject.to_string(),
            body: body.to_string(),
            recipients: recipients.to_vec(),
        });
        if self.fail {
            return Err(MailError::Delivery("relay refused the message".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    fatals: Mutex<Vec<String>>,
    logs: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn fatals(&self) -> Vec<String> {
        self.fatals.lock().clone()
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn fatal(&self, message: &str) {
        self.fatals.lock().push(message.to_string());
    }

    fn log(&self, message: &str) {
        self.logs.lock().push(message.to_string());
    }
}

pub struct StaticDirectory {
    entries: Vec<AdminEntry>,
}

impl StaticDirectory {
    pub fn new(entries: Vec<AdminEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl AdminDirectory for StaticDirectory {
    async fn administrators(&self) -> Result<Vec<AdminEntry>, DirectoryError> {
        Ok(self.entries.clone())
    }
}

pub struct FailingDirectory;

#[async_trait]
impl AdminDirectory for FailingDirectory {
    async fn administrators(&self) -> Result<Vec<AdminEntry>, DirectoryError> {
        Err(DirectoryError::Read {
            path: "memory".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "directory unavailable"),
        })
    }
}
