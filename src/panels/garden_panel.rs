use egui::{Color32, Rect, Vec2};

use crate::gallery::GardenStatus;
use crate::PumpkinApp;

pub fn garden_panel(app: &mut PumpkinApp, ui: &mut egui::Ui) {
    let area = ui.available_rect_before_wrap();

    ui.horizontal(|ui| {
        if ui.add_enabled(!app.garden.is_loading(), egui::Button::new("Refresh")).clicked() {
            app.garden.refresh(ui.ctx(), app.gateway.clone());
        }
        if app.garden.is_loading() {
            ui.spinner();
        }
    });

    match app.garden.status().clone() {
        GardenStatus::Loading => {
            ui.centered_and_justified(|ui| ui.label("Loading garden…"));
            return;
        }
        GardenStatus::Failed(message) => {
            ui.centered_and_justified(|ui| ui.colored_label(Color32::from_rgb(0xdc, 0x26, 0x26), format!("Error: {message}")));
            return;
        }
        GardenStatus::Ready => {}
    }

    if app.garden.items().is_empty() {
        ui.centered_and_justified(|ui| ui.label("No pumpkins yet. Save one 🎃"));
        return;
    }

    let footprint = app.garden.config().footprint;
    let layout = app.garden.layout_for(area.size()).to_vec();
    let ctx = ui.ctx().clone();

    for placed in layout {
        let Some(item) = app.garden.items().get(placed.item).cloned() else {
            continue;
        };
        let Some(texture) = app.garden.textures.get_or_load(&ctx, &item) else {
            continue;
        };

        let center = area.min + placed.center.to_vec2();
        let rect = Rect::from_center_size(center, contain(texture.size_vec2(), footprint));
        egui::Image::from_texture(texture)
            .rotate((placed.rotation as f32).to_radians(), Vec2::splat(0.5))
            .paint_at(ui, rect);
    }
}

/// Scale `size` to fit inside a square of side `side`, keeping its aspect ratio
fn contain(size: Vec2, side: f32) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::splat(side);
    }
    size * (side / size.x).min(side / size.y)
}
