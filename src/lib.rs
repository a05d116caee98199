pub mod admin;
pub mod akismet;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod host;
pub mod infrastructure;
pub mod options;
pub mod testing;

pub use domain::{CommentSubmission, CommentTarget, ContentObject, Verdict};
pub use error::FilterError;
pub use filter::SpamFilter;
pub use host::{AkismetPlugin, RequestHeaders};
