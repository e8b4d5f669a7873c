use egui::Pos2;
use pumpkin_garden::drawing::Drawing;
use pumpkin_garden::stroke::{PenColor, Stroke, Tool};

// Helper to draw a short stroke from a list of points
fn draw(drawing: &mut Drawing, tool: Tool, color: PenColor, points: &[(f32, f32)]) {
    let (first, rest) = points.split_first().unwrap();
    drawing.pointer_down(Pos2::new(first.0, first.1), tool, color);
    for (x, y) in rest {
        drawing.pointer_move(Pos2::new(*x, *y));
    }
    drawing.pointer_up();
}

fn create_test_drawing() -> Drawing {
    let mut drawing = Drawing::new();
    draw(&mut drawing, Tool::Pen, PenColor::Orange, &[(10.0, 10.0), (20.0, 20.0), (30.0, 25.0)]);
    draw(&mut drawing, Tool::Pen, PenColor::Green, &[(50.0, 5.0), (50.0, 15.0)]);
    draw(&mut drawing, Tool::Eraser, PenColor::Green, &[(15.0, 15.0), (25.0, 20.0)]);
    drawing
}

fn snapshot(drawing: &Drawing) -> (Vec<Stroke>, Vec<Stroke>) {
    (drawing.strokes().to_vec(), drawing.redo_stack().to_vec())
}

#[test]
fn test_undo_then_redo_restores_state() {
    let mut drawing = create_test_drawing();
    let before = snapshot(&drawing);

    assert!(drawing.undo());
    assert_ne!(snapshot(&drawing), before);
    assert!(drawing.redo());

    assert_eq!(snapshot(&drawing), before);
}

#[test]
fn test_multiple_undos_redo_in_reverse_order() {
    let mut drawing = create_test_drawing();
    let before = snapshot(&drawing);

    for _ in 0..3 {
        assert!(drawing.undo());
    }
    assert!(drawing.is_empty());
    assert!(!drawing.undo());
    assert_eq!(drawing.redo_stack().len(), 3);

    // The first redo brings back the first stroke that was drawn.
    assert!(drawing.redo());
    assert_eq!(drawing.strokes()[0].color(), PenColor::Orange);

    while drawing.redo() {}
    assert_eq!(snapshot(&drawing), before);
}

#[test]
fn test_new_stroke_after_undo_clears_redo() {
    let mut drawing = create_test_drawing();
    drawing.undo();
    drawing.undo();
    assert!(drawing.can_redo());

    drawing.pointer_down(Pos2::new(1.0, 1.0), Tool::Pen, PenColor::Red);
    assert!(!drawing.can_redo());
    assert!(!drawing.redo());

    drawing.pointer_up();
    assert_eq!(drawing.strokes().len(), 2);
    assert_eq!(drawing.strokes()[1].color(), PenColor::Red);
}

#[test]
fn test_finished_stroke_is_not_extended() {
    let mut drawing = create_test_drawing();
    let before = snapshot(&drawing);
    drawing.pointer_move(Pos2::new(99.0, 99.0));
    assert_eq!(snapshot(&drawing), before);
}

#[test]
fn test_strokes_keep_tool_and_color() {
    let drawing = create_test_drawing();
    let tools: Vec<Tool> = drawing.strokes().iter().map(|s| s.tool()).collect();
    assert_eq!(tools, vec![Tool::Pen, Tool::Pen, Tool::Eraser]);
    assert_eq!(drawing.strokes()[0].points().len(), 3);
}

#[test]
fn test_drawing_persists_without_transient_state() {
    let mut drawing = create_test_drawing();
    drawing.undo();
    drawing.pointer_down(Pos2::new(5.0, 5.0), Tool::Pen, PenColor::Black);

    let json = serde_json::to_string(&drawing).unwrap();
    let restored: Drawing = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.strokes(), drawing.strokes());
    assert!(!restored.is_drawing());
}
