use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

/// Width of a pen stroke in canvas pixels
pub const PEN_WIDTH: f32 = 5.0;

/// Width of an eraser stroke, also the side of the eraser cursor preview
pub const ERASER_SIZE: f32 = 20.0;

/// What a stroke does to the surface it is drawn on
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::Pen, Tool::Eraser];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
        }
    }

    pub fn width(self) -> f32 {
        match self {
            Tool::Pen => PEN_WIDTH,
            Tool::Eraser => ERASER_SIZE,
        }
    }
}

/// The fixed pen palette
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenColor {
    #[default]
    Black,
    White,
    Green,
    Orange,
    Red,
    Yellow,
}

impl PenColor {
    pub const ALL: [PenColor; 6] = [
        PenColor::Black,
        PenColor::White,
        PenColor::Green,
        PenColor::Orange,
        PenColor::Red,
        PenColor::Yellow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PenColor::Black => "black",
            PenColor::White => "white",
            PenColor::Green => "green",
            PenColor::Orange => "orange",
            PenColor::Red => "red",
            PenColor::Yellow => "yellow",
        }
    }

    /// CSS named-color values
    pub fn to_color32(self) -> Color32 {
        match self {
            PenColor::Black => Color32::from_rgb(0x00, 0x00, 0x00),
            PenColor::White => Color32::from_rgb(0xff, 0xff, 0xff),
            PenColor::Green => Color32::from_rgb(0x00, 0x80, 0x00),
            PenColor::Orange => Color32::from_rgb(0xff, 0xa5, 0x00),
            PenColor::Red => Color32::from_rgb(0xff, 0x00, 0x00),
            PenColor::Yellow => Color32::from_rgb(0xff, 0xff, 0x00),
        }
    }
}

/// One continuous pointer-down-to-pointer-up path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    tool: Tool,
    color: PenColor,
    points: Vec<Pos2>,
}

impl Stroke {
    /// Start a stroke at `start`
    pub fn new(tool: Tool, color: PenColor, start: Pos2) -> Self {
        Self {
            tool,
            color,
            points: vec![start],
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> PenColor {
        self.color
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.tool.width()
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == Tool::Eraser
    }

    // Only the drawing appends, and only to its last stroke.
    pub(crate) fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }
}
