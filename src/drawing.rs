use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::stroke::{PenColor, Stroke, Tool};

/// The strokes on the canvas plus the strokes that can be redone.
///
/// Insertion order is z-order: later strokes paint (or erase) over earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Drawing {
    strokes: Vec<Stroke>,
    /// Stack of strokes removed by undo, most recent last
    redo_stack: Vec<Stroke>,
    /// Whether the pointer is currently down on the canvas
    #[serde(skip)]
    is_drawing: bool,
    /// Bumped on every change so renderers know when to recomposite
    #[serde(skip)]
    revision: u64,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo_stack
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start a new stroke at `pos`. Any redo history is discarded.
    pub fn pointer_down(&mut self, pos: Pos2, tool: Tool, color: PenColor) {
        self.is_drawing = true;
        self.redo_stack.clear();
        self.strokes.push(Stroke::new(tool, color, pos));
        self.touch();
    }

    /// Extend the last stroke while the pointer is down.
    ///
    /// Returns true if a point was appended.
    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        if !self.is_drawing {
            return false;
        }
        let Some(stroke) = self.strokes.last_mut() else {
            return false;
        };
        stroke.add_point(pos);
        self.touch();
        true
    }

    pub fn pointer_up(&mut self) {
        self.is_drawing = false;
    }

    /// Move the last stroke onto the redo stack.
    ///
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        // An undone stroke can never be extended again.
        self.is_drawing = false;
        match self.strokes.pop() {
            Some(stroke) => {
                self.redo_stack.push(stroke);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back onto the drawing.
    ///
    /// Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.is_drawing = false;
        match self.redo_stack.pop() {
            Some(stroke) => {
                self.strokes.push(stroke);
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop every stroke and the redo history
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.redo_stack.clear();
        self.is_drawing = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
