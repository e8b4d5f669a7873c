use egui::{Color32, Painter, Pos2, Rect, Stroke as EguiStroke, TextureHandle, TextureOptions, Vec2};

use crate::compositing;
use crate::drawing::Drawing;
use crate::stroke::ERASER_SIZE;
use crate::texture_manager::to_color_image;

const CANVAS_BACKDROP: Color32 = Color32::WHITE;
const CANVAS_BORDER: Color32 = Color32::from_gray(0x94);
const CURSOR_COLOR: Color32 = Color32::from_gray(0x33);

/// Draws the composited drawing as a texture, recompositing only when the
/// drawing or the canvas size changed.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Drawing revision and pixel size the texture was built for
    cached: Option<(u64, [u32; 2])>,
    canvas_size: [u32; 2],
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("cached", &self.cached)
            .field("canvas_size", &self.canvas_size)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the canvas at the last render, used for export
    pub fn canvas_size(&self) -> [u32; 2] {
        self.canvas_size
    }

    /// Whether the next render has to recomposite
    pub fn needs_update(&self, drawing: &Drawing, size: [u32; 2]) -> bool {
        self.cached != Some((drawing.revision(), size))
    }

    /// Renders the drawing into `rect`
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect, drawing: &Drawing) {
        let size = pixel_size(rect);
        self.canvas_size = size;

        if self.needs_update(drawing, size) {
            let image = to_color_image(&compositing::composite(drawing, size));
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::LINEAR)),
            }
            self.cached = Some((drawing.revision(), size));
        }

        painter.rect_filled(rect, 0.0, CANVAS_BACKDROP);
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
        painter.rect_stroke(rect, 2.0, EguiStroke::new(2.0, CANVAS_BORDER));
    }

    /// Dashed square showing what the eraser will cover
    pub fn draw_eraser_cursor(&self, painter: &Painter, center: Pos2) {
        let rect = Rect::from_center_size(center, Vec2::splat(ERASER_SIZE));
        let outline = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        painter.extend(egui::Shape::dashed_line(
            &outline,
            EguiStroke::new(1.0, CURSOR_COLOR),
            4.0,
            4.0,
        ));
    }
}

fn pixel_size(rect: Rect) -> [u32; 2] {
    [
        rect.width().round().max(0.0) as u32,
        rect.height().round().max(0.0) as u32,
    ]
}
