//! QR code rendering for PIX "copia e cola" payloads.
//!
//! The API already returns the payload string (`pixCopiaECola`); these helpers
//! turn it into an SVG image or a `data:` URL for embedding in HTML.

use ::qrcode::render::svg;
use ::qrcode::types::QrError;
use ::qrcode::{EcLevel, QrCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{PixResult, ValidationError};

/// Rendering options for [`generate_qr_code_svg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeOptions {
    /// Minimum width and height of the image, in pixels.
    pub size: u32,
    /// Surround the code with the standard four-module quiet zone.
    pub quiet_zone: bool,
    pub dark_color: String,
    pub light_color: String,
}

impl Default for QrCodeOptions {
    fn default() -> Self {
        Self {
            size: 256,
            quiet_zone: true,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
        }
    }
}

impl QrCodeOptions {
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_colors(mut self, dark: impl Into<String>, light: impl Into<String>) -> Self {
        self.dark_color = dark.into();
        self.light_color = light.into();
        self
    }

    pub fn without_quiet_zone(mut self) -> Self {
        self.quiet_zone = false;
        self
    }
}

/// Encode `data` as a QR code with error correction level M.
pub fn encode_qr_code(data: &str) -> PixResult<QrCode> {
    if data.is_empty() {
        return Err(ValidationError::new("data", "QR code data must not be empty").into());
    }

    QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M).map_err(|e| {
        let constraint = match e {
            QrError::DataTooLong => format!(
                "Data too long for QR code. Got {} bytes.",
                data.len()
            ),
            other => other.to_string(),
        };
        ValidationError::new("data", constraint).into()
    })
}

/// Render `data` as an SVG document.
pub fn generate_qr_code_svg(data: &str, options: &QrCodeOptions) -> PixResult<String> {
    let code = encode_qr_code(data)?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(options.size, options.size)
        .quiet_zone(options.quiet_zone)
        .dark_color(svg::Color(&options.dark_color))
        .light_color(svg::Color(&options.light_color))
        .build())
}

/// Render `data` as a base64 `data:image/svg+xml` URL.
pub fn generate_qr_code_data_url(data: &str, options: &QrCodeOptions) -> PixResult<String> {
    let svg = generate_qr_code_svg(data, options)?;
    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)))
}
