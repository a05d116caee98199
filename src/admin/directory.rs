use std::path::PathBuf;

use async_trait::async_trait;

use crate::{domain::AdminEntry, error::DirectoryError};

/// Host administrator and group directory.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn administrators(&self) -> Result<Vec<AdminEntry>, DirectoryError>;
}

/// Directory kept as a JSON array of entries; re-read on every lookup.
pub struct JsonFileDirectory {
    path: PathBuf,
}

impl JsonFileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AdminDirectory for JsonFileDirectory {
    async fn administrators(&self) -> Result<Vec<AdminEntry>, DirectoryError> {
        let display = self.path.display().to_string();
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DirectoryError::Read {
                path: display.clone(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| DirectoryError::Parse {
            path: display,
            source,
        })
    }
}
