use crate::{domain::CommentSubmission, error::FilterError};

pub const API_VERSION: &str = "1.1";
pub const COMMENT_TYPE: &str = "comment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    CommentCheck,
    VerifyKey,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::CommentCheck => "comment-check",
            Method::VerifyKey => "verify-key",
        }
    }
}

/// Resolves the URL for an API call. Key verification lives on the bare
/// service host; every other method is addressed through `<key>.<host>`.
pub fn endpoint(service_host: &str, method: Method, api_key: &str) -> Result<String, FilterError> {
    match method {
        Method::VerifyKey => Ok(format!(
            "http://{service_host}/{API_VERSION}/{}",
            method.as_str()
        )),
        Method::CommentCheck => {
            if api_key.is_empty() {
                return Err(FilterError::MissingApiKey);
            }
            Ok(format!(
                "http://{api_key}.{service_host}/{API_VERSION}/{}",
                method.as_str()
            ))
        }
    }
}

/// Form body of one `comment-check` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub blog: String,
    pub user_ip: String,
    pub user_agent: String,
    pub referrer: String,
    pub permalink: String,
    pub comment_author: String,
    pub comment_author_email: String,
    pub comment_author_url: String,
    pub comment_content: String,
}

impl ClassificationRequest {
    pub fn build(site_url: &str, permalink_path: &str, submission: &CommentSubmission) -> Self {
        let blog = site_url.trim_end_matches('/').to_string();
        let permalink = if permalink_path.starts_with('/') {
            format!("{blog}{permalink_path}")
        } else {
            format!("{blog}/{permalink_path}")
        };
        Self {
            blog,
            user_ip: submission.submitter_ip.clone(),
            user_agent: submission.user_agent.clone().unwrap_or_default(),
            referrer: submission.referrer.clone().unwrap_or_default(),
            permalink,
            comment_author: submission.author.clone(),
            comment_author_email: submission.email.clone(),
            comment_author_url: submission.website.clone(),
            comment_content: submission.body.clone(),
        }
    }

    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("blog", self.blog.as_str()),
            ("user_ip", self.user_ip.as_str()),
            ("user_agent", self.user_agent.as_str()),
            ("referrer", self.referrer.as_str()),
            ("permalink", self.permalink.as_str()),
            ("comment_type", COMMENT_TYPE),
            ("comment_author", self.comment_author.as_str()),
            ("comment_author_email", self.comment_author_email.as_str()),
            ("comment_author_url", self.comment_author_url.as_str()),
            ("comment_content", self.comment_content.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Spam,
    Ham,
    Unrecognized,
}

/// The service answers with the bare literal `true` or `false`.
pub fn interpret_comment_check(body: &str) -> CheckOutcome {
    match body {
        "true" => CheckOutcome::Spam,
        "false" => CheckOutcome::Ham,
        _ => CheckOutcome::Unrecognized,
    }
}

pub fn interpret_verify_key(body: &str) -> Option<bool> {
    match body {
        "valid" => Some(true),
        "invalid" => Some(false),
        _ => None,
    }
}
