use serde::{Deserialize, Serialize};

/// Outcome of classifying one comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Spam,
    /// Uncertain; the host queues the comment for moderation.
    PossibleSpam,
    NotSpam,
}

impl Verdict {
    /// Integer encoding understood by the host's comment pipeline.
    pub fn host_code(self) -> i32 {
        match self {
            Verdict::Spam => 0,
            Verdict::PossibleSpam => 1,
            Verdict::NotSpam => 2,
        }
    }

    pub fn from_host_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Verdict::Spam),
            1 => Some(Verdict::PossibleSpam),
            2 => Some(Verdict::NotSpam),
            _ => None,
        }
    }
}
