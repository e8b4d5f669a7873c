use egui::{Context, Key, Modifiers, Pos2, Rect, Response};

use crate::drawing::Drawing;
use crate::stroke::{PenColor, Tool};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas origin
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Canvas gestures after they have been read from egui
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button (or touch) went down inside the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved inside the canvas
    PointerMove { location: InputLocation, held: bool },
    /// Primary button (or touch) was released anywhere
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
    Undo,
    Redo,
}

impl InputEvent {
    /// Feed the event into the drawing with the selected tool and color
    pub fn apply_to(&self, drawing: &mut Drawing, tool: Tool, color: PenColor) {
        match *self {
            InputEvent::PointerDown { location } => drawing.pointer_down(location.position, tool, color),
            InputEvent::PointerMove { location, held: true } => {
                drawing.pointer_move(location.position);
            }
            InputEvent::PointerMove { held: false, .. } | InputEvent::PointerLeave => {}
            InputEvent::PointerUp => drawing.pointer_up(),
            InputEvent::Undo => {
                drawing.undo();
            }
            InputEvent::Redo => {
                drawing.redo();
            }
        }
    }
}

/// One frame of raw pointer and shortcut state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    pub hover_pos: Option<Pos2>,
    /// The canvas widget is the topmost thing under the pointer
    pub canvas_hovered: bool,
    pub primary_pressed: bool,
    pub primary_down: bool,
    pub primary_released: bool,
    pub undo: bool,
    pub redo: bool,
}

impl PointerSnapshot {
    /// Read this frame's state for the `canvas` widget, consuming the
    /// undo/redo shortcuts unless a text field has keyboard focus
    pub fn capture(ctx: &Context, canvas: &Response) -> Self {
        let shortcuts = !ctx.wants_keyboard_input();
        ctx.input_mut(|input| {
            // Shift variant first: the plain shortcut also matches with shift held.
            let redo = shortcuts
                && (input.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                    || input.consume_key(Modifiers::COMMAND, Key::Y));
            let undo = shortcuts && input.consume_key(Modifiers::COMMAND, Key::Z);
            Self {
                hover_pos: input.pointer.hover_pos(),
                canvas_hovered: canvas.hovered(),
                primary_pressed: input.pointer.primary_pressed(),
                primary_down: input.pointer.primary_down(),
                primary_released: input.pointer.primary_released(),
                undo,
                redo,
            }
        })
    }
}

/// Handles converting raw egui input into canvas [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    /// Last position inside the canvas, canvas-relative
    cursor: Option<Pos2>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            cursor: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Pointer position over the canvas, canvas-relative
    pub fn cursor(&self) -> Option<Pos2> {
        self.cursor
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    pub fn process_input(&mut self, ctx: &Context, canvas: &Response) -> Vec<InputEvent> {
        self.translate(PointerSnapshot::capture(ctx, canvas))
    }

    pub fn translate(&mut self, snapshot: PointerSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match snapshot.hover_pos.map(|pos| self.make_location(pos)) {
            Some(location) if location.is_in_canvas => {
                // Presses landing on a window or popup above the canvas are not strokes.
                if snapshot.primary_pressed && snapshot.canvas_hovered {
                    events.push(InputEvent::PointerDown { location });
                } else if self.cursor != Some(location.position) {
                    events.push(InputEvent::PointerMove {
                        location,
                        held: snapshot.primary_down,
                    });
                }
                self.cursor = Some(location.position);
            }
            _ => {
                if self.cursor.take().is_some() {
                    events.push(InputEvent::PointerLeave);
                }
            }
        }

        if snapshot.primary_released {
            events.push(InputEvent::PointerUp);
        }
        if snapshot.undo {
            events.push(InputEvent::Undo);
        }
        if snapshot.redo {
            events.push(InputEvent::Redo);
        }

        events
    }
}
