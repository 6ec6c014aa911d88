//! Composites the code image onto a ticket base image.

use image::imageops;

use crate::ports::{ArtifactError, ImageComposer};

/// Decodes base and overlay PNGs, overlays at the requested position,
/// and re-encodes a single flattened PNG.
pub struct PngImageComposer;

impl ImageComposer for PngImageComposer {
    fn compose(
        &self,
        base: &[u8],
        overlay: &[u8],
        position: (i64, i64),
    ) -> Result<Vec<u8>, ArtifactError> {
        let mut base_image = image::load_from_memory(base)
            .map_err(|e| ArtifactError::Composite(format!("base image: {e}")))?;
        let overlay_image = image::load_from_memory(overlay)
            .map_err(|e| ArtifactError::Composite(format!("overlay image: {e}")))?;

        imageops::overlay(&mut base_image, &overlay_image, position.0, position.1);

        let mut buffer = Vec::new();
        base_image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageOutputFormat::Png,
            )
            .map_err(|e| ArtifactError::Composite(e.to_string()))?;

        Ok(buffer)
    }
}
