use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FolioError, FolioResult};
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Writes each frame as `frame_NNNNN.png` under one directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    out_dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.out_dir.join(format!("frame_{:05}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> FolioResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FolioError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("create output dir '{}'", self.out_dir.display())
        })?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FolioResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| FolioError::encode("png sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(FolioError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let straight = frame.to_straight();
        let path = self.frame_path(idx);
        image::save_buffer_with_format(
            &path,
            &straight.data,
            straight.width,
            straight.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::trace!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FolioResult<()> {
        self.cfg = None;
        tracing::info!(frames = self.written.len(), dir = %self.out_dir.display(), "png sequence done");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
