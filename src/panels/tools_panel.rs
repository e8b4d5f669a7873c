use egui::{Color32, Sense, Stroke, Vec2};

use crate::stroke::{PenColor, Tool};
use crate::PumpkinApp;

const SWATCH_SIZE: f32 = 24.0;

pub fn tools_panel(app: &mut PumpkinApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("tool_select")
            .selected_text(app.tool.label())
            .show_ui(ui, |ui| {
                for tool in Tool::ALL {
                    if ui.selectable_value(&mut app.tool, tool, tool.label()).clicked() {
                        log::info!("Tool selected from UI: {}", tool.label());
                    }
                }
            });

        for color in PenColor::ALL {
            if color_swatch(ui, color, app.color == color).clicked() {
                app.color = color;
            }
        }
        ui.label(format!("Color: {}", app.color.name()));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Moderate").clicked() {
                app.show_admin = !app.show_admin;
            }
            if ui.add_enabled(app.drawing.can_redo(), egui::Button::new("Redo")).clicked() {
                app.redo();
            }
            if ui.add_enabled(app.drawing.can_undo(), egui::Button::new("Undo")).clicked() {
                app.undo();
            }
        });
    });
}

fn color_swatch(ui: &mut egui::Ui, color: PenColor, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::click());
    let outline = if selected {
        Stroke::new(2.0, Color32::from_gray(0x33))
    } else {
        Stroke::new(1.0, Color32::from_gray(0xcb))
    };
    ui.painter()
        .circle(rect.center(), SWATCH_SIZE / 2.0 - 1.0, color.to_color32(), outline);
    response.on_hover_text(color.name())
}

pub fn save_row(app: &mut PumpkinApp, ui: &mut egui::Ui) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let button = egui::Button::new("Save pumpkin 🎃");
        if ui.add_enabled(!app.is_submitting(), button).clicked() {
            app.save_pumpkin(ui.ctx());
        }
        if app.is_submitting() {
            ui.spinner();
        }
    });
}
