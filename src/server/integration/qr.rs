//! QR code rendering for ticket verification links.

use qrcode::{render::svg, QrCode};

use crate::server::error::integration::IntegrationError;

/// Renders `data` as a standalone SVG document.
pub fn render_svg(data: &str) -> Result<String, IntegrationError> {
    let code = QrCode::new(data.as_bytes())?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}
