use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::RgbaImage;

use crate::backend::GalleryItem;
use crate::submission::decode_data_url;

/// Convert a straight-alpha surface into an egui image
pub fn to_color_image(surface: &RgbaImage) -> ColorImage {
    let size = [surface.width() as usize, surface.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, surface.as_raw())
}

/// Decoded textures for pumpkin images, keyed by pumpkin id.
///
/// Images that fail to decode are remembered as `None` so they are only
/// attempted once.
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<i64, Option<TextureHandle>>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets or decodes the texture for `item`
    pub fn get_or_load(&mut self, ctx: &Context, item: &GalleryItem) -> Option<&TextureHandle> {
        self.textures
            .entry(item.id)
            .or_insert_with(|| match decode_data_url(&item.img) {
                Ok(surface) => Some(ctx.load_texture(
                    format!("pumpkin_{}", item.id),
                    to_color_image(&surface),
                    TextureOptions::LINEAR,
                )),
                Err(e) => {
                    log::warn!("Pumpkin {} has an unreadable image: {e}", item.id);
                    None
                }
            })
            .as_ref()
    }

    /// Drop textures for pumpkins no longer listed
    pub fn retain(&mut self, keep: impl Fn(i64) -> bool) {
        self.textures.retain(|id, _| keep(*id));
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn clear_cache(&mut self) {
        self.textures.clear();
    }
}
