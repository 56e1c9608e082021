use crate::animation::config::AnimationConfig;
use crate::foundation::core::{Canvas, FrameIndex, Point, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Walk,
    Run,
    Jump,
    Dance,
}

/// Mode draw table. Walk appears twice so it stays the baseline.
pub const MODE_TABLE: [Mode; 5] = [Mode::Walk, Mode::Walk, Mode::Run, Mode::Jump, Mode::Dance];

/// Per-mode limb parameters at a given clock value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gait {
    pub leg_speed: f64,
    pub arm_speed: f64,
    pub leg_amplitude: f64,
    pub arm_amplitude: f64,
    pub vertical_bob: f64,
    pub jump_height: f64,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Walk => "WALK",
            Mode::Run => "RUN",
            Mode::Jump => "JUMP",
            Mode::Dance => "DANCE",
        }
    }

    pub fn speed_multiplier(self) -> f64 {
        match self {
            Mode::Walk => 1.0,
            Mode::Run => 2.0,
            Mode::Jump => 1.5,
            Mode::Dance => 0.0,
        }
    }

    pub fn gait(self, time: f64) -> Gait {
        let walk = Gait {
            leg_speed: 3.0,
            arm_speed: 3.0,
            leg_amplitude: 30.0,
            arm_amplitude: 20.0,
            vertical_bob: 5.0,
            jump_height: 0.0,
        };
        match self {
            Mode::Walk => walk,
            Mode::Run => Gait {
                leg_speed: 5.0,
                arm_speed: 5.0,
                leg_amplitude: 45.0,
                arm_amplitude: 35.0,
                vertical_bob: 8.0,
                ..walk
            },
            Mode::Jump => Gait {
                leg_amplitude: 20.0,
                arm_amplitude: 15.0,
                jump_height: (time * 2.0).sin().abs() * 80.0,
                ..walk
            },
            Mode::Dance => Gait {
                leg_speed: 4.0,
                arm_speed: 4.0,
                leg_amplitude: 15.0,
                arm_amplitude: 30.0,
                vertical_bob: (time * 4.0).sin().abs() * 10.0,
                ..walk
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementPattern {
    Horizontal,
    Wave,
    Zigzag,
    Spiral,
}

pub const PATTERN_TABLE: [MovementPattern; 4] = [
    MovementPattern::Horizontal,
    MovementPattern::Wave,
    MovementPattern::Zigzag,
    MovementPattern::Spiral,
];

impl MovementPattern {
    pub fn label(self) -> &'static str {
        match self {
            MovementPattern::Horizontal => "HORIZONTAL",
            MovementPattern::Wave => "WAVE",
            MovementPattern::Zigzag => "ZIGZAG",
            MovementPattern::Spiral => "SPIRAL",
        }
    }

    /// Vertical position around `baseline`.
    pub fn offset_y(self, baseline: f64, time: f64, wave_offset: f64) -> f64 {
        match self {
            MovementPattern::Wave => baseline + (wave_offset * 2.0).sin() * 80.0,
            MovementPattern::Zigzag => {
                if (wave_offset.floor() as i64).rem_euclid(2) == 0 {
                    baseline - 50.0
                } else {
                    baseline + 50.0
                }
            }
            MovementPattern::Spiral => {
                let radius = 60.0;
                let speed = 0.1;
                baseline + (time * speed).sin() * radius * wave_offset.sin()
            }
            MovementPattern::Horizontal => baseline + (time * 6.0).sin() * 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vec2,
    /// Ticks lived, starting at 1.
    pub age: f64,
    pub lifespan: f64,
}

impl Particle {
    /// Remaining life in `[0, 1]`.
    pub fn vitality(&self) -> f64 {
        if self.lifespan <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.lifespan).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.age > self.lifespan
    }
}

/// Viewport and theme as read at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickInput {
    pub viewport: Canvas,
    pub dark: bool,
}

/// Everything the walker remembers between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkerState {
    pub frame: FrameIndex,
    pub time: f64,
    pub wave_offset: f64,
    pub position: Point,
    pub direction: Direction,
    pub mode: Mode,
    pub mode_countdown: u32,
    pub pattern: MovementPattern,
    pub pattern_countdown: u32,
    /// Ticks of glitch left; glitching while positive.
    pub glitch_countdown: u32,
    pub particles: Vec<Particle>,
}

impl WalkerState {
    /// Fresh state for a newly mounted walker.
    pub fn mount(cfg: &AnimationConfig, viewport: Canvas) -> Self {
        Self {
            frame: FrameIndex(0),
            time: 0.0,
            wave_offset: 0.0,
            position: Point::new(-cfg.edge_margin, baseline_y(cfg, viewport)),
            direction: Direction::Right,
            mode: Mode::Walk,
            mode_countdown: cfg.mode_countdown.initial,
            pattern: MovementPattern::Horizontal,
            pattern_countdown: cfg.pattern_countdown.initial,
            glitch_countdown: 0,
            particles: Vec::new(),
        }
    }

    pub fn is_glitching(&self) -> bool {
        self.glitch_countdown > 0
    }
}

impl Default for WalkerState {
    fn default() -> Self {
        Self::mount(
            &AnimationConfig::default(),
            Canvas {
                width: 0,
                height: 0,
            },
        )
    }
}

pub fn baseline_y(cfg: &AnimationConfig, viewport: Canvas) -> f64 {
    f64::from(viewport.height) * cfg.baseline_ratio
}
