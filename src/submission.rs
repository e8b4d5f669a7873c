use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::SubmitRequest;
use crate::compositing;
use crate::drawing::Drawing;
use crate::error::RenderError;

/// Storage key the client id is persisted under
pub const CLIENT_ID_KEY: &str = "pumpkin_user_id";

const PNG_PREFIX: &str = "data:image/png;base64,";

/// Random identifier generated once per installation and reused for every submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse a stored id, or generate one when there is none
    pub fn from_stored(stored: Option<String>) -> Self {
        match stored {
            Some(id) if !id.trim().is_empty() => Self(id),
            _ => Self::generate(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a surface as a `data:image/png;base64,` URL
pub fn encode_data_url(surface: &RgbaImage) -> Result<String, RenderError> {
    if surface.width() == 0 || surface.height() == 0 {
        return Err(RenderError::EmptySurface);
    }
    let mut png = Vec::new();
    surface.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let mut url = String::with_capacity(PNG_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(PNG_PREFIX);
    STANDARD.encode_string(&png, &mut url);
    Ok(url)
}

/// Decode any `data:image/...;base64,` URL into pixels
pub fn decode_data_url(url: &str) -> Result<RgbaImage, RenderError> {
    let (_, encoded) = url
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .ok_or(RenderError::NotDataUrl)?;
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Composite the drawing at the canvas size and wrap it with the client id
pub fn prepare_submission(
    drawing: &Drawing,
    canvas_size: [u32; 2],
    client_id: &ClientId,
) -> Result<SubmitRequest, RenderError> {
    let surface = compositing::composite(drawing, canvas_size);
    Ok(SubmitRequest {
        image_data: encode_data_url(&surface)?,
        user_id: client_id.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::validate_submission;
    use crate::stroke::{PenColor, Tool};
    use egui::Pos2;

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = ClientId::generate();
        let b = ClientId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_stored_id_is_reused() {
        let id = ClientId::from_stored(Some("stored-client-id".into()));
        assert_eq!(id.as_str(), "stored-client-id");

        let fresh = ClientId::from_stored(Some("   ".into()));
        assert!(Uuid::parse_str(fresh.as_str()).is_ok());
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        assert!(matches!(encode_data_url(&RgbaImage::new(0, 0)), Err(RenderError::EmptySurface)));
    }

    #[test]
    fn test_prepared_submission_passes_validation() {
        let mut drawing = Drawing::new();
        drawing.pointer_down(Pos2::new(10.0, 10.0), Tool::Pen, PenColor::Orange);
        drawing.pointer_move(Pos2::new(40.0, 40.0));
        drawing.pointer_up();

        let request = prepare_submission(&drawing, [64, 64], &ClientId::generate()).unwrap();
        assert!(request.image_data.starts_with(PNG_PREFIX));
        assert!(validate_submission(&request).is_ok());

        let decoded = decode_data_url(&request.image_data).unwrap();
        assert_eq!(decoded.dimensions(), (64, 64));
        assert_eq!(decoded.get_pixel(25, 25)[3], 255);
        assert_eq!(decoded.get_pixel(60, 2)[3], 0);
    }

    #[test]
    fn test_decode_rejects_other_urls() {
        assert!(matches!(decode_data_url("https://example.test/p.png"), Err(RenderError::NotDataUrl)));
    }
}
