use crate::foundation::core::{Circle, Line, Point, Rect, Rgba8};

/// One backend-agnostic drawing instruction in viewport pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Reset the whole target to the backend's clear color.
    Clear,
    Line {
        line: Line,
        width: f64,
        color: Rgba8,
    },
    FillCircle {
        circle: Circle,
        color: Rgba8,
    },
    StrokeCircle {
        circle: Circle,
        width: f64,
        color: Rgba8,
    },
    /// Soft halo: a filled circle whose edge fades out over `blur` pixels.
    Glow {
        circle: Circle,
        blur: f64,
        color: Rgba8,
    },
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    StrokeRect {
        rect: Rect,
        width: f64,
        color: Rgba8,
    },
    /// Single-line text with its baseline-left corner at `origin`.
    Text {
        origin: Point,
        text: String,
        size_px: f32,
        bold: bool,
        color: Rgba8,
    },
}

/// Ordered draw commands for one frame, painted back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
