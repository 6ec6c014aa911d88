//! Artwork ports - code rendering, base image loading, and compositing.
//!
//! The renderer and composer are pure request/response collaborators:
//! bytes in, bytes out, no state. The base image store is the only one
//! touching IO. All three report through `ArtifactError`, which is
//! always scoped to a single unit's fulfillment.

use async_trait::async_trait;
use thiserror::Error;

/// Errors while producing a single ticket artifact.
///
/// Any variant fails exactly one unit; siblings and the surrounding
/// request are unaffected.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Base image missing or unreadable for a ticket type.
    #[error("Base image unavailable for ticket type '{ticket_type}': {reason}")]
    Asset { ticket_type: String, reason: String },

    /// Scannable-code image generation failed.
    #[error("Code rendering failed: {0}")]
    Render(String),

    /// Compositing the code onto the base image failed.
    #[error("Image composition failed: {0}")]
    Composite(String),
}

impl ArtifactError {
    /// Creates an asset error for a ticket type.
    pub fn asset(ticket_type: impl Into<String>, reason: impl Into<String>) -> Self {
        ArtifactError::Asset {
            ticket_type: ticket_type.into(),
            reason: reason.into(),
        }
    }
}

/// Renders a scannable-code image encoding the given payload.
///
/// Implementations use a fixed pixel size and margin; the payload is the
/// ticket identifier string.
pub trait CodeRenderer: Send + Sync {
    /// Render the payload into PNG image bytes.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::Render` if encoding fails.
    fn render(&self, payload: &str) -> Result<Vec<u8>, ArtifactError>;
}

/// Composites an overlay image onto a base image at a given position.
pub trait ImageComposer: Send + Sync {
    /// Produce a single flattened PNG from base + overlay.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::Composite` if either buffer cannot be
    /// decoded or the result cannot be encoded.
    fn compose(
        &self,
        base: &[u8],
        overlay: &[u8],
        position: (i64, i64),
    ) -> Result<Vec<u8>, ArtifactError>;
}

/// Loads the base image for a ticket type.
#[async_trait]
pub trait BaseImageStore: Send + Sync {
    /// Load the base image bytes selected solely by ticket type.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::Asset` if the image is missing or unreadable.
    async fn load(&self, ticket_type: &str) -> Result<Vec<u8>, ArtifactError>;
}
