use crate::animation::pose::Pose;
use crate::animation::state::{Mode, MovementPattern, Particle};
use crate::foundation::core::{Circle, Point, Rect, Rgba8};
use crate::render::draw::{DrawCommand, DrawList};

pub const WALKER_ID: &str = "WALKER_01";
pub const TRACKING_LOST: &str = "⚠ TRACKING LOST";

const BONE_WIDTH: f64 = 3.0;
const JOINT_RADIUS: f64 = 4.0;
const HEAD_RADIUS: f64 = 8.0;
const HEAD_GLOW_RADIUS: f64 = 6.0;
const HEAD_GLOW_BLUR: f64 = 15.0;
const PANEL_SIZE: (f64, f64) = (120.0, 50.0);

/// Colors for one theme. The alert color replaces bone and joint colors while glitching.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bone: Rgba8,
    pub joint: Rgba8,
    pub alert: Rgba8,
    pub particle: Rgba8,
    pub head_glow: Rgba8,
    pub panel_fill: Rgba8,
    pub panel_border: Rgba8,
    pub id_text: Rgba8,
    pub label_text: Rgba8,
    pub confidence: Rgba8,
}

impl Palette {
    pub fn for_theme(dark: bool) -> Self {
        let alert = Rgba8::hex(0xef4444);
        if dark {
            Self {
                bone: Rgba8::new(14, 165, 233, 255).with_alpha(0.4),
                joint: Rgba8::hex(0x38bdf8),
                alert,
                particle: Rgba8::new(56, 189, 248, 255),
                head_glow: Rgba8::new(56, 189, 248, 255).with_alpha(0.2),
                panel_fill: Rgba8::new(15, 23, 42, 255).with_alpha(0.8),
                panel_border: Rgba8::new(56, 189, 248, 255).with_alpha(0.5),
                id_text: Rgba8::hex(0x94a3b8),
                label_text: Rgba8::hex(0x64748b),
                confidence: Rgba8::hex(0x4ade80),
            }
        } else {
            Self {
                bone: Rgba8::new(251, 146, 60, 255).with_alpha(0.4),
                joint: Rgba8::hex(0xfb923c),
                alert,
                particle: Rgba8::new(251, 146, 60, 255),
                head_glow: Rgba8::new(251, 146, 60, 255).with_alpha(0.2),
                panel_fill: Rgba8::new(255, 247, 237, 255).with_alpha(0.9),
                panel_border: Rgba8::new(251, 146, 60, 255).with_alpha(0.5),
                id_text: Rgba8::hex(0x78716c),
                label_text: Rgba8::hex(0xa8a29e),
                confidence: Rgba8::hex(0x15803d),
            }
        }
    }
}

/// The floating status panel's content.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusReadout {
    pub mode: Mode,
    pub pattern: MovementPattern,
    pub confidence: f64,
    pub glitching: bool,
}

impl StatusReadout {
    pub fn id_line(&self) -> String {
        format!("ID: {WALKER_ID}")
    }

    pub fn mode_line(&self) -> String {
        format!("{} | {}", self.mode.label(), self.pattern.label())
    }

    pub fn confidence_line(&self) -> String {
        format!("CONF: {:.2}", self.confidence)
    }

    pub fn warning(&self) -> Option<&'static str> {
        self.glitching.then_some(TRACKING_LOST)
    }
}

/// Paint one frame: particles, skeleton, then the status panel.
pub fn compose(
    walker: Point,
    pose: &Pose,
    particles: &[Particle],
    readout: &StatusReadout,
    palette: &Palette,
    scale: f64,
) -> DrawList {
    let mut list = DrawList::new();
    list.push(DrawCommand::Clear);

    for p in particles {
        let v = p.vitality();
        let radius = 2.0 * v;
        if radius <= 0.0 {
            continue;
        }
        list.push(DrawCommand::FillCircle {
            circle: Circle::new(p.position, radius),
            color: palette.particle.with_alpha(v * 0.4),
        });
    }

    let (bone, joint) = if readout.glitching {
        (palette.alert, palette.alert)
    } else {
        (palette.bone, palette.joint)
    };

    for line in pose.bones(HEAD_RADIUS + 2.0) {
        list.push(DrawCommand::Line {
            line,
            width: BONE_WIDTH,
            color: bone,
        });
    }

    list.push(DrawCommand::StrokeCircle {
        circle: Circle::new(pose.head, HEAD_RADIUS * scale),
        width: 2.0,
        color: joint,
    });
    if !readout.glitching {
        list.push(DrawCommand::Glow {
            circle: Circle::new(pose.head, HEAD_GLOW_RADIUS * scale),
            blur: HEAD_GLOW_BLUR,
            color: palette.head_glow,
        });
    }

    for j in pose.joints() {
        list.push(DrawCommand::FillCircle {
            circle: Circle::new(j, JOINT_RADIUS),
            color: joint,
        });
    }

    let origin = Point::new(walker.x - PANEL_SIZE.0 / 2.0, walker.y - 180.0);
    let panel = Rect::from_origin_size(origin, PANEL_SIZE);
    list.push(DrawCommand::FillRect {
        rect: panel,
        color: palette.panel_fill,
    });
    list.push(DrawCommand::StrokeRect {
        rect: panel,
        width: 1.0,
        color: palette.panel_border,
    });

    let text_x = origin.x + 10.0;
    list.push(DrawCommand::Text {
        origin: Point::new(text_x, origin.y + 15.0),
        text: readout.id_line(),
        size_px: 10.0,
        bold: false,
        color: palette.id_text,
    });
    list.push(DrawCommand::Text {
        origin: Point::new(text_x, origin.y + 27.0),
        text: readout.mode_line(),
        size_px: 8.0,
        bold: false,
        color: palette.label_text,
    });
    list.push(DrawCommand::Text {
        origin: Point::new(text_x, origin.y + 41.0),
        text: readout.confidence_line(),
        size_px: 11.0,
        bold: true,
        color: if readout.glitching {
            palette.alert
        } else {
            palette.confidence
        },
    });
    if let Some(warning) = readout.warning() {
        list.push(DrawCommand::Text {
            origin: Point::new(text_x, walker.y - 145.0),
            text: warning.to_string(),
            size_px: 9.0,
            bold: false,
            color: palette.alert,
        });
    }

    list
}
