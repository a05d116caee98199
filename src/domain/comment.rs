use serde::Deserialize;

/// Fields of a submitted comment plus what the host knows about the request
/// that carried it. None of the strings are validated here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentSubmission {
    pub author: String,
    pub email: String,
    pub website: String,
    pub body: String,
    #[serde(alias = "ip")]
    pub submitter_ip: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl CommentSubmission {
    pub fn new(
        author: impl Into<String>,
        email: impl Into<String>,
        website: impl Into<String>,
        body: impl Into<String>,
        submitter_ip: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            email: email.into(),
            website: website.into(),
            body: body.into(),
            submitter_ip: submitter_ip.into(),
            user_agent: None,
            referrer: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }
}
