//! QR code renderer for ticket identifiers.

use image::{DynamicImage, Luma};
use qrcode::QrCode;

use crate::ports::{ArtifactError, CodeRenderer};

/// Minimum edge length of the rendered code, in pixels.
const CODE_SIZE_PX: u32 = 300;

/// Renders ticket identifiers as QR code PNGs.
///
/// Output is a black-on-white code at a fixed minimum size with the
/// standard quiet zone, ready to composite onto a base image.
pub struct QrCodeRenderer;

impl CodeRenderer for QrCodeRenderer {
    fn render(&self, payload: &str) -> Result<Vec<u8>, ArtifactError> {
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| ArtifactError::Render(e.to_string()))?;

        let rendered = code
            .render::<Luma<u8>>()
            .min_dimensions(CODE_SIZE_PX, CODE_SIZE_PX)
            .quiet_zone(true)
            .build();

        let mut buffer = Vec::new();
        DynamicImage::ImageLuma8(rendered)
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageOutputFormat::Png,
            )
            .map_err(|e| ArtifactError::Render(e.to_string()))?;

        Ok(buffer)
    }
}
