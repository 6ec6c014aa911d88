//! Filesystem-backed base image store.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::ports::{ArtifactError, BaseImageStore};

/// Loads base images from `{base_dir}/{ticket_type}.png`.
pub struct FilesystemBaseImageStore {
    base_dir: PathBuf,
}

impl FilesystemBaseImageStore {
    /// Creates a store rooted at the given directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl BaseImageStore for FilesystemBaseImageStore {
    async fn load(&self, ticket_type: &str) -> Result<Vec<u8>, ArtifactError> {
        // Ticket types name files directly; anything that could escape
        // the asset directory is rejected outright.
        if ticket_type.is_empty()
            || ticket_type.contains('/')
            || ticket_type.contains('\\')
            || ticket_type.contains("..")
        {
            return Err(ArtifactError::asset(ticket_type, "invalid ticket type"));
        }

        let path = self.base_dir.join(format!("{ticket_type}.png"));
        tokio::fs::read(&path)
            .await
            .map_err(|e| ArtifactError::asset(ticket_type, format!("{}: {e}", path.display())))
    }
}
