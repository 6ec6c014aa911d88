//! ArtifactGenerator - produces one ticket image per unit.
//!
//! For each unit: derive a fresh identifier, render it as a scannable
//! code, load the type's base image, and composite the code onto it.
//! Each step is independently failable and any failure is scoped to the
//! unit being generated.

use std::sync::Arc;

use crate::domain::ticketing::{TicketIdentifier, TicketUnit};
use crate::ports::{ArtifactError, BaseImageStore, CodeRenderer, ImageComposer};

/// Offset at which the code image is composited onto the base image.
/// Type-independent: every base image reserves the same code area.
const CODE_OFFSET: (i64, i64) = (400, 860);

/// A generated ticket artifact: the identifier plus the flattened image.
#[derive(Debug, Clone)]
pub struct TicketArtifact {
    /// Unique identifier embedded in the code image.
    pub identifier: TicketIdentifier,

    /// Flattened PNG of base image + code.
    pub image: Vec<u8>,
}

/// Generates ticket artifacts from units.
pub struct ArtifactGenerator {
    renderer: Arc<dyn CodeRenderer>,
    base_images: Arc<dyn BaseImageStore>,
    composer: Arc<dyn ImageComposer>,
}

impl ArtifactGenerator {
    /// Creates a generator over the given artwork ports.
    pub fn new(
        renderer: Arc<dyn CodeRenderer>,
        base_images: Arc<dyn BaseImageStore>,
        composer: Arc<dyn ImageComposer>,
    ) -> Self {
        Self {
            renderer,
            base_images,
            composer,
        }
    }

    /// Generates the artifact for one unit.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError` if rendering, asset loading, or
    /// compositing fails. The error concerns this unit only.
    pub async fn generate(&self, unit: &TicketUnit) -> Result<TicketArtifact, ArtifactError> {
        let identifier = TicketIdentifier::generate(&unit.ticket_type);

        let code_image = self.renderer.render(identifier.as_str())?;
        let base_image = self.base_images.load(&unit.ticket_type).await?;
        let image = self
            .composer
            .compose(&base_image, &code_image, CODE_OFFSET)?;

        Ok(TicketArtifact { identifier, image })
    }
}
