pub mod admin;
pub mod comment;
pub mod target;
pub mod types;

pub use admin::{AdminContact, AdminEntry, ADMIN_RIGHTS};
pub use comment::CommentSubmission;
pub use target::{CommentTarget, ContentObject};
pub use types::Verdict;
