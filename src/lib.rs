//! folio renders a localized portfolio and everything that hangs off it.
//!
//! - Load and validate a [`ContentDocument`] through a [`ContentStore`]
//! - Export it as a paginated PDF resume with [`export_resume`]
//! - Tick the procedural walker with an [`AnimationEngine`] and rasterize its draw lists with
//!   [`CpuRenderer`] into a [`FrameSink`]
//! - Track view toggles and display flags in a [`Shell`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod content;
/// Frame sinks: in-memory, PNG sequence and ffmpeg.
pub mod encode;
/// Resume layout and PDF serialization.
pub mod export;
pub mod foundation;
pub mod render;
pub mod shell;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{FolioError, FolioResult};
pub use crate::foundation::rng::{RandomSource, Rng64};

pub use crate::animation::config::AnimationConfig;
pub use crate::animation::driver::{AnimationLoop, DisplayFlags};
pub use crate::animation::engine::{AnimationEngine, TickFrame};
pub use crate::animation::state::TickInput;
pub use crate::content::model::{ContentDocument, Locale};
pub use crate::content::store::{ContentStore, LoadState};
pub use crate::encode::ffmpeg::{EncodeConfig, FfmpegSink};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::export::layout::PageGeometry;
pub use crate::export::resume::Variant;
pub use crate::export::{ExportedDocument, export_resume, export_resume_with};
pub use crate::render::backend::{FrameRGBA, FrameRenderer, RenderSettings};
pub use crate::render::cpu::CpuRenderer;
pub use crate::shell::Shell;
pub use crate::shell::view::{ProjectFilter, Theme, ViewState};
