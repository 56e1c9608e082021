use crate::animation::engine::{AnimationEngine, TickFrame};
use crate::animation::state::TickInput;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{FolioError, FolioResult};
use crate::foundation::rng::RandomSource;
use crate::render::backend::FrameRenderer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::Instant;

#[derive(Debug, Default)]
struct FlagCells {
    dark: AtomicBool,
    width: AtomicU32,
    height: AtomicU32,
}

/// Viewport size and theme, written by the shell and read by the frame loop at tick start.
///
/// Clones share the same cells.
#[derive(Clone, Debug, Default)]
pub struct DisplayFlags {
    cells: Arc<FlagCells>,
}

impl DisplayFlags {
    pub fn new(viewport: Canvas, dark: bool) -> Self {
        let flags = Self::default();
        flags.set_viewport(viewport);
        flags.set_dark(dark);
        flags
    }

    pub fn set_dark(&self, dark: bool) {
        self.cells.dark.store(dark, Ordering::Relaxed);
    }

    pub fn set_viewport(&self, viewport: Canvas) {
        self.cells.width.store(viewport.width, Ordering::Relaxed);
        self.cells.height.store(viewport.height, Ordering::Relaxed);
    }

    pub fn is_dark(&self) -> bool {
        self.cells.dark.load(Ordering::Relaxed)
    }

    pub fn viewport(&self) -> Canvas {
        Canvas {
            width: self.cells.width.load(Ordering::Relaxed),
            height: self.cells.height.load(Ordering::Relaxed),
        }
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            viewport: self.viewport(),
            dark: self.is_dark(),
        }
    }
}

/// A running frame loop. The engine lives on a background thread and ticks at a fixed cadence,
/// handing each [`TickFrame`] to the subscriber.
///
/// Dropping the loop stops and joins the thread.
#[derive(Debug)]
pub struct AnimationLoop {
    stop: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl AnimationLoop {
    pub fn spawn<R, F>(
        mut engine: AnimationEngine<R>,
        flags: DisplayFlags,
        fps: Fps,
        mut subscriber: F,
    ) -> FolioResult<Self>
    where
        R: RandomSource + Send + 'static,
        F: FnMut(&TickFrame) + Send + 'static,
    {
        let period = fps.frame_duration();
        let stop = Arc::new(AtomicBool::new(false));
        let ticks = Arc::new(AtomicU64::new(0));

        let thread_stop = Arc::clone(&stop);
        let thread_ticks = Arc::clone(&ticks);
        let handle = std::thread::Builder::new()
            .name("folio-walker".to_string())
            .spawn(move || {
                while !thread_stop.load(Ordering::Acquire) {
                    let started = Instant::now();
                    let frame = engine.tick(flags.snapshot());
                    subscriber(&frame);
                    thread_ticks.fetch_add(1, Ordering::Release);
                    if let Some(rest) = period.checked_sub(started.elapsed()) {
                        std::thread::park_timeout(rest);
                    }
                }
                tracing::debug!(ticks = thread_ticks.load(Ordering::Acquire), "frame loop exited");
            })
            .map_err(|e| FolioError::Other(anyhow::anyhow!("spawn frame loop thread: {e}")))?;

        tracing::debug!(fps = fps.as_f64(), "frame loop started");
        Ok(Self {
            stop,
            ticks,
            handle: Some(handle),
        })
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop ticking and wait for the thread. No subscriber call happens after this returns.
    pub fn stop(mut self) -> FolioResult<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> FolioResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        self.stop.store(true, Ordering::Release);
        handle.thread().unpark();
        handle
            .join()
            .map_err(|_| FolioError::Other(anyhow::anyhow!("frame loop thread panicked")))
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::warn!(error = %err, "frame loop shutdown failed");
        }
    }
}

impl<R: RandomSource> AnimationEngine<R> {
    /// Tick `frames` times at a fixed viewport and theme, rasterize every frame and push it to
    /// `sink`.
    #[tracing::instrument(skip(self, renderer, sink))]
    pub fn run(
        &mut self,
        frames: u64,
        input: TickInput,
        fps: Fps,
        renderer: &mut dyn FrameRenderer,
        sink: &mut dyn FrameSink,
    ) -> FolioResult<()> {
        sink.begin(SinkConfig {
            width: input.viewport.width,
            height: input.viewport.height,
            fps,
        })?;
        for _ in 0..frames {
            let tick = self.tick(input);
            let frame = renderer.render(input.viewport, &tick.draw)?;
            sink.push_frame(tick.frame, &frame)?;
        }
        sink.end()?;
        tracing::info!(frames, "offline run finished");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
