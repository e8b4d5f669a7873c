use egui::Vec2;

use crate::stroke::Tool;
use crate::PumpkinApp;

/// Smallest canvas side in points
const MIN_CANVAS_SIDE: f32 = 300.0;

pub fn canvas_panel(app: &mut PumpkinApp, ui: &mut egui::Ui) {
    let size = ui.available_size().max(Vec2::splat(MIN_CANVAS_SIDE));
    let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
    let canvas_rect = response.rect;

    app.input.set_canvas_rect(canvas_rect);
    for event in app.input.process_input(ui.ctx(), &response) {
        event.apply_to(&mut app.drawing, app.tool, app.color);
    }

    app.renderer.render(ui.ctx(), &painter, canvas_rect, &app.drawing);

    if app.tool == Tool::Eraser {
        if let Some(cursor) = app.input.cursor() {
            app.renderer
                .draw_eraser_cursor(&painter, canvas_rect.min + cursor.to_vec2());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Key, Modifiers, PointerButton, Pos2, RawInput, Rect};
    use std::sync::Arc;

    use crate::app::Preferences;
    use crate::backend::BackendConfig;
    use crate::gateway::LocalGateway;
    use crate::stroke::PenColor;
    use crate::submission::ClientId;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);
    const PRESS_AT: Pos2 = Pos2::new(400.0, 300.0);

    fn app() -> PumpkinApp {
        PumpkinApp::with_gateway(
            Arc::new(LocalGateway::new(BackendConfig::default())),
            Preferences::default(),
            ClientId::generate(),
        )
    }

    /// Run one frame with the canvas in the central panel and `overlay` above it
    fn frame(
        ctx: &egui::Context,
        app: &mut PumpkinApp,
        events: Vec<Event>,
        modifiers: Modifiers,
        overlay: &mut dyn FnMut(&egui::Context),
    ) {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, SCREEN)),
            modifiers,
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| canvas_panel(app, ui));
            overlay(ctx);
        });
    }

    fn warm_up(ctx: &egui::Context, app: &mut PumpkinApp, overlay: &mut dyn FnMut(&egui::Context)) {
        for _ in 0..4 {
            frame(ctx, app, vec![Event::PointerMoved(PRESS_AT)], Modifiers::NONE, overlay);
        }
    }

    fn click(ctx: &egui::Context, app: &mut PumpkinApp, overlay: &mut dyn FnMut(&egui::Context)) {
        warm_up(ctx, app, overlay);
        for pressed in [true, false] {
            let event = Event::PointerButton {
                pos: PRESS_AT,
                button: PointerButton::Primary,
                pressed,
                modifiers: Modifiers::NONE,
            };
            frame(ctx, app, vec![event], Modifiers::NONE, overlay);
        }
    }

    fn undo_shortcut(ctx: &egui::Context, app: &mut PumpkinApp, overlay: &mut dyn FnMut(&egui::Context)) {
        let event = Event::Key {
            key: Key::Z,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::COMMAND,
        };
        frame(ctx, app, vec![event], Modifiers::COMMAND, overlay);
    }

    fn with_undone_stroke(app: &mut PumpkinApp) {
        app.drawing.pointer_down(Pos2::new(5.0, 5.0), Tool::Pen, PenColor::Black);
        app.drawing.pointer_up();
        app.drawing.undo();
    }

    fn with_stroke(app: &mut PumpkinApp) {
        app.drawing.pointer_down(Pos2::new(5.0, 5.0), Tool::Pen, PenColor::Black);
        app.drawing.pointer_up();
    }

    #[test]
    fn test_click_on_canvas_draws() {
        let ctx = egui::Context::default();
        let mut app = app();
        click(&ctx, &mut app, &mut |_| {});
        assert_eq!(app.drawing.strokes().len(), 1);
    }

    #[test]
    fn test_click_on_window_over_canvas_does_not_draw() {
        let ctx = egui::Context::default();
        let mut app = app();
        with_undone_stroke(&mut app);

        let mut clicked = false;
        click(&ctx, &mut app, &mut |ctx| {
            egui::Window::new("Moderation")
                .fixed_pos(Pos2::new(300.0, 200.0))
                .show(ctx, |ui| {
                    if ui.add_sized([200.0, 200.0], egui::Button::new("Approve")).clicked() {
                        clicked = true;
                    }
                });
        });

        assert!(clicked);
        assert!(app.drawing.is_empty());
        assert!(app.drawing.can_redo());
    }

    #[test]
    fn test_undo_shortcut_applies_to_canvas() {
        let ctx = egui::Context::default();
        let mut app = app();
        with_stroke(&mut app);

        warm_up(&ctx, &mut app, &mut |_| {});
        undo_shortcut(&ctx, &mut app, &mut |_| {});
        assert!(app.drawing.is_empty());
    }

    #[test]
    fn test_undo_shortcut_in_text_field_keeps_strokes() {
        let ctx = egui::Context::default();
        let mut app = app();
        with_stroke(&mut app);

        let mut password = String::new();
        let mut overlay = |ctx: &egui::Context| {
            egui::Window::new("Moderation")
                .fixed_pos(Pos2::new(300.0, 200.0))
                .show(ctx, |ui| {
                    ui.text_edit_singleline(&mut password).request_focus();
                });
        };
        warm_up(&ctx, &mut app, &mut overlay);
        assert!(ctx.wants_keyboard_input());
        undo_shortcut(&ctx, &mut app, &mut overlay);

        assert_eq!(app.drawing.strokes().len(), 1);
    }
}
