use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FolioError, FolioResult};
use crate::render::backend::FrameRGBA;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Output settings for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Straight RGBA8 background that transparent pixels are flattened onto.
    pub bg_rgba: [u8; 4],
}

impl EncodeConfig {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }

    pub fn with_background(mut self, bg_rgba: [u8; 4]) -> Self {
        self.bg_rgba = bg_rgba;
        self
    }

    /// Check the output against the frame geometry it will receive.
    pub fn validate(&self, sink: &SinkConfig) -> FolioResult<()> {
        if sink.width == 0 || sink.height == 0 {
            return Err(FolioError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if sink.fps.num == 0 || sink.fps.den == 0 {
            return Err(FolioError::validation("encode fps must be non-zero"));
        }
        if !sink.width.is_multiple_of(2) || !sink.height.is_multiple_of(2) {
            return Err(FolioError::validation(
                "encode width/height must be even (yuv420p output)",
            ));
        }
        if self.out_path.as_os_str().is_empty() {
            return Err(FolioError::validation("encode out_path must be non-empty"));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(FolioError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }
}

/// Streams flattened RGBA frames into a system `ffmpeg` producing H.264 MP4.
pub struct FfmpegSink {
    cfg: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
    sink_cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    pub fn new(cfg: EncodeConfig) -> Self {
        Self {
            cfg,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            sink_cfg: None,
            last_idx: None,
        }
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.cfg
    }

    /// Process id of the running encoder, between `begin` and `end`.
    pub fn child_id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }
}

impl Drop for FfmpegSink {
    /// A sink dropped before `end` kills the encoder and reaps it along with the drain thread.
    fn drop(&mut self) {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return;
        };
        tracing::warn!(out = %self.cfg.out_path.display(), "ffmpeg sink dropped before end");
        if let Err(e) = child.kill() {
            tracing::debug!(error = %e, "ffmpeg already exited");
        }
        if let Err(e) = child.wait() {
            tracing::warn!(error = %e, "failed to reap ffmpeg");
        }
        if let Some(handle) = self.stderr_drain.take()
            && handle.join().is_err()
        {
            tracing::warn!("ffmpeg stderr drain thread panicked");
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, sink_cfg: SinkConfig) -> FolioResult<()> {
        self.cfg.validate(&sink_cfg)?;
        ensure_parent_dir(&self.cfg.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(FolioError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", sink_cfg.width, sink_cfg.height),
            "-r",
            &format!("{}/{}", sink_cfg.fps.num, sink_cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.cfg.out_path);

        let mut child = cmd
            .spawn()
            .map_err(|e| FolioError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FolioError::encode("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| FolioError::encode("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(out = %self.cfg.out_path.display(), width = sink_cfg.width, height = sink_cfg.height, "spawned ffmpeg");
        self.scratch = vec![0u8; (sink_cfg.width as usize) * (sink_cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.sink_cfg = Some(sink_cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FolioResult<()> {
        let cfg = self
            .sink_cfg
            .ok_or_else(|| FolioError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(FolioError::encode("ffmpeg sink received out-of-order frame"));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(FolioError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(FolioError::encode("ffmpeg sink is already finalized"));
        };
        use std::io::Write as _;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| FolioError::encode(format!("failed to write frame to ffmpeg: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> FolioResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| FolioError::encode("ffmpeg sink not started"))?;
        let status = child
            .wait()
            .map_err(|e| FolioError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| FolioError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| FolioError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        self.sink_cfg = None;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(FolioError::encode(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }
        tracing::info!(out = %self.cfg.out_path.display(), "mp4 written");
        Ok(())
    }
}

/// Composite RGBA8 over an opaque background, leaving every alpha at 255.
pub fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> FolioResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FolioError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> FolioResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
