//! QR code credential rendering
//!
//! Envelopes are encoded at error-correction level H and rendered as
//! grayscale PNG.

use std::io::Cursor;

use base64::Engine;
use elithe_core::{CredentialEnvelope, CredentialIssuanceError, CredentialIssuer};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::config::CredentialConfig;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Renders credential envelopes as PNG QR codes
#[derive(Debug, Clone)]
pub struct QrCredentialIssuer {
    min_size: u32,
}

impl QrCredentialIssuer {
    #[must_use]
    pub fn new(min_size: u32) -> Self {
        Self { min_size }
    }

    #[must_use]
    pub fn from_config(config: &CredentialConfig) -> Self {
        Self::new(config.qr_size)
    }
}

impl Default for QrCredentialIssuer {
    fn default() -> Self {
        Self::from_config(&CredentialConfig::default())
    }
}

impl CredentialIssuer for QrCredentialIssuer {
    fn render(&self, envelope: &CredentialEnvelope) -> Result<Vec<u8>, CredentialIssuanceError> {
        let payload = envelope.to_payload()?;

        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
            .map_err(|e| CredentialIssuanceError::Encode(e.to_string()))?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CredentialIssuanceError::Render(e.to_string()))?;

        Ok(png)
    }
}

/// Encode PNG bytes as a `data:image/png;base64,...` URL
#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    format!("{PNG_DATA_URL_PREFIX}{encoded}")
}
