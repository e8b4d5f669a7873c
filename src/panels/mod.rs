mod admin_panel;
mod canvas_panel;
mod garden_panel;
mod tools_panel;

pub use admin_panel::{admin_window, AdminState};
pub use canvas_panel::canvas_panel;
pub use garden_panel::garden_panel;
pub use tools_panel::{save_row, tools_panel};

use crate::PumpkinApp;

/// Bottom-right notification, kept alive until it expires
pub fn toast_overlay(app: &mut PumpkinApp, ctx: &egui::Context, now: f64) {
    let remaining = app.toasts.remaining(now);
    let Some(text) = app.toasts.current(now) else {
        return;
    };

    egui::Area::new(egui::Id::new("toast"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_rgb(0x1e, 0x29, 0x3b))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                });
        });

    if let Some(seconds) = remaining {
        ctx.request_repaint_after(std::time::Duration::from_secs_f64(seconds));
    }
}
