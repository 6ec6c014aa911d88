//! Ticket artwork asset configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Asset configuration for ticket base images
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Directory holding one base image per ticket type
    /// (`{base_image_dir}/{ticket_type}.png`)
    #[serde(default = "default_base_image_dir")]
    pub base_image_dir: PathBuf,
}

impl AssetConfig {
    /// Path of the base image for a ticket type
    pub fn base_image_path(&self, ticket_type: &str) -> PathBuf {
        self.base_image_dir.join(format!("{ticket_type}.png"))
    }

    /// Validate asset configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_image_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingAssetDirectory);
        }
        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_image_dir: default_base_image_dir(),
        }
    }
}

fn default_base_image_dir() -> PathBuf {
    PathBuf::from("assets/tickets")
}
