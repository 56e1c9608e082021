use crate::animation::config::{AnimationConfig, CountdownRange};
use crate::animation::pose::Pose;
use crate::animation::scene::{Palette, StatusReadout, compose};
use crate::animation::state::{
    Direction, MODE_TABLE, Mode, MovementPattern, PATTERN_TABLE, Particle, TickInput, WalkerState,
    baseline_y,
};
use crate::foundation::core::{FrameIndex, Point, Vec2};
use crate::foundation::rng::{RandomSource, Rng64};
use crate::render::draw::DrawList;

/// Output of one tick, besides the next state.
#[derive(Clone, Debug, PartialEq)]
pub struct TickFrame {
    pub frame: FrameIndex,
    pub pose: Pose,
    pub readout: StatusReadout,
    pub draw: DrawList,
}

/// Advance the walker by one tick.
///
/// Pure apart from the draws taken from `rng`. The viewport and theme in `input` are read once,
/// here, and the theme only affects colors.
pub fn step<R: RandomSource>(
    cfg: &AnimationConfig,
    mut state: WalkerState,
    input: TickInput,
    rng: &mut R,
) -> (WalkerState, TickFrame) {
    state.time += cfg.time_step;
    state.wave_offset += cfg.time_step;

    state.mode_countdown = state.mode_countdown.saturating_sub(1);
    if state.mode_countdown == 0 {
        state.mode = rng.pick(&MODE_TABLE).copied().unwrap_or(Mode::Walk);
        state.mode_countdown = rearm(&cfg.mode_countdown, rng);
        tracing::debug!(
            mode = state.mode.label(),
            countdown = state.mode_countdown,
            "mode switch"
        );
    }
    state.pattern_countdown = state.pattern_countdown.saturating_sub(1);
    if state.pattern_countdown == 0 {
        state.pattern = rng
            .pick(&PATTERN_TABLE)
            .copied()
            .unwrap_or(MovementPattern::Horizontal);
        state.pattern_countdown = rearm(&cfg.pattern_countdown, rng);
        tracing::debug!(
            pattern = state.pattern.label(),
            countdown = state.pattern_countdown,
            "pattern switch"
        );
    }

    let speed = cfg.base_speed * state.mode.speed_multiplier();
    let mut x = state.position.x + speed * state.direction.sign();
    let left = -cfg.edge_margin;
    let right = f64::from(input.viewport.width) + cfg.edge_margin;
    if x > right {
        x = right;
        state.direction = Direction::Left;
    } else if x < left {
        x = left;
        state.direction = Direction::Right;
    }
    let baseline = baseline_y(cfg, input.viewport);
    let y = state.pattern.offset_y(baseline, state.time, state.wave_offset);
    state.position = Point::new(x, y);

    if state.glitch_countdown == 0 && rng.chance(cfg.glitch_probability) {
        state.glitch_countdown = cfg.glitch_duration;
        tracing::debug!(frame = state.frame.0, "glitch episode");
    }
    let glitching = state.is_glitching();

    if rng.chance(cfg.particle_probability) {
        let position = Point::new(x + rng.centered(20.0), y + 50.0 + rng.centered(10.0));
        let velocity = Vec2::new(rng.centered(1.0), -rng.next_f64() * 2.0 - 1.0);
        let lifespan = rng.range(cfg.particle_lifespan_min, cfg.particle_lifespan_max);
        state.particles.push(Particle {
            position,
            velocity,
            age: 1.0,
            lifespan,
        });
    }

    for p in &mut state.particles {
        p.position += p.velocity;
        p.velocity.y += cfg.particle_gravity;
        p.age += 1.0;
    }
    state.particles.retain(|p| !p.is_expired());

    let jitter_span = cfg.glitch_jitter;
    let pose = Pose::solve(
        state.mode,
        state.time,
        state.position,
        cfg.skeleton_scale,
        || {
            if glitching {
                rng.centered(jitter_span)
            } else {
                0.0
            }
        },
    );

    let confidence = if glitching {
        rng.next_f64() * 0.2
    } else {
        0.95 + rng.next_f64() * 0.04
    };
    let readout = StatusReadout {
        mode: state.mode,
        pattern: state.pattern,
        confidence,
        glitching,
    };

    let palette = Palette::for_theme(input.dark);
    let draw = compose(
        state.position,
        &pose,
        &state.particles,
        &readout,
        &palette,
        cfg.skeleton_scale,
    );

    let frame = TickFrame {
        frame: state.frame,
        pose,
        readout,
        draw,
    };

    state.glitch_countdown = state.glitch_countdown.saturating_sub(1);
    state.frame = FrameIndex(state.frame.0 + 1);
    (state, frame)
}

fn rearm<R: RandomSource>(range: &CountdownRange, rng: &mut R) -> u32 {
    let v = rng.range(f64::from(range.min), f64::from(range.max)).floor() as u32;
    let hi = range.max.saturating_sub(1).max(range.min);
    v.clamp(range.min, hi)
}

/// Owns the walker state and its random source between ticks.
#[derive(Debug)]
pub struct AnimationEngine<R: RandomSource = Rng64> {
    cfg: AnimationConfig,
    state: WalkerState,
    rng: R,
}

impl AnimationEngine<Rng64> {
    /// Mount with a clock-seeded generator.
    pub fn mount(cfg: AnimationConfig, input: TickInput) -> Self {
        Self::with_rng(cfg, input, Rng64::from_clock())
    }
}

impl<R: RandomSource> AnimationEngine<R> {
    pub fn with_rng(cfg: AnimationConfig, input: TickInput, rng: R) -> Self {
        let state = WalkerState::mount(&cfg, input.viewport);
        Self { cfg, state, rng }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.cfg
    }

    pub fn state(&self) -> &WalkerState {
        &self.state
    }

    pub fn tick(&mut self, input: TickInput) -> TickFrame {
        let prev = std::mem::take(&mut self.state);
        let (next, frame) = step(&self.cfg, prev, input, &mut self.rng);
        self.state = next;
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
