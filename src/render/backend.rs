use crate::foundation::core::Canvas;
use crate::foundation::error::FolioResult;
use crate::render::draw::DrawList;
use std::path::PathBuf;

/// A rendered frame as RGBA8 pixels.
///
/// Frames coming out of [`crate::render::cpu::CpuRenderer`] are premultiplied. The
/// `premultiplied` flag keeps that explicit at sink boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy of this frame with straight alpha, as image encoders expect.
    pub fn to_straight(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_in_place(&mut data);
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let mut px: [u8; 4] = self.data.get(i..i + 4)?.try_into().ok()?;
        if self.premultiplied {
            unpremultiply_in_place(&mut px);
        }
        Some(px)
    }
}

/// Anything that can paint a [`DrawList`] onto a fresh frame.
pub trait FrameRenderer {
    fn render(&mut self, canvas: Canvas, list: &DrawList) -> FolioResult<FrameRGBA>;
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, [`crate::render::draw::DrawCommand::Clear`] fills the target with this straight
    /// RGBA8 color. Otherwise frames start transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Font file used for status-panel text. Text commands are skipped without one.
    pub font_path: Option<PathBuf>,
}

/// Convert premultiplied RGBA8 to straight alpha.
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
