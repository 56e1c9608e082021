use serde::{Deserialize, Serialize};

use crate::foundation::error::{FolioError, FolioResult};

/// Countdown bounds in ticks for a randomly re-armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountdownRange {
    /// Countdown armed at mount.
    pub initial: u32,
    /// Inclusive lower bound of re-armed countdowns.
    pub min: u32,
    /// Exclusive upper bound of re-armed countdowns.
    pub max: u32,
}

impl CountdownRange {
    fn validate(&self, name: &str) -> FolioResult<()> {
        if self.initial == 0 || self.min == 0 || self.min >= self.max {
            return Err(FolioError::validation(format!(
                "{name}: expected initial > 0 and 0 < min < max"
            )));
        }
        Ok(())
    }
}

/// Tuning constants for the walker. Every field has a default matching the shipped look.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Clock advance per tick.
    pub time_step: f64,
    /// Horizontal pixels per tick at walking pace.
    pub base_speed: f64,
    /// Width of the off-screen band the walker may enter before turning around.
    pub edge_margin: f64,
    /// Baseline height as a fraction of the viewport height.
    pub baseline_ratio: f64,
    /// Skeleton scale factor.
    pub skeleton_scale: f64,
    pub mode_countdown: CountdownRange,
    pub pattern_countdown: CountdownRange,
    /// Per-tick probability of starting a glitch episode.
    pub glitch_probability: f64,
    /// Glitch episode length in ticks.
    pub glitch_duration: u32,
    /// Full span of per-coordinate jitter while glitching.
    pub glitch_jitter: f64,
    /// Per-tick probability of spawning a particle.
    pub particle_probability: f64,
    /// Downward acceleration applied to particles each tick.
    pub particle_gravity: f64,
    pub particle_lifespan_min: f64,
    pub particle_lifespan_max: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.05,
            base_speed: 2.5,
            edge_margin: 100.0,
            baseline_ratio: 0.6,
            skeleton_scale: 1.2,
            mode_countdown: CountdownRange {
                initial: 300,
                min: 200,
                max: 600,
            },
            pattern_countdown: CountdownRange {
                initial: 500,
                min: 400,
                max: 1000,
            },
            glitch_probability: 0.003,
            glitch_duration: 60,
            glitch_jitter: 150.0,
            particle_probability: 0.3,
            particle_gravity: 0.1,
            particle_lifespan_min: 30.0,
            particle_lifespan_max: 60.0,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> FolioResult<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(FolioError::validation("time_step must be finite and > 0"));
        }
        if !(self.base_speed.is_finite() && self.base_speed >= 0.0) {
            return Err(FolioError::validation("base_speed must be finite and >= 0"));
        }
        if !(self.edge_margin.is_finite() && self.edge_margin >= 0.0) {
            return Err(FolioError::validation("edge_margin must be finite and >= 0"));
        }
        self.mode_countdown.validate("mode_countdown")?;
        self.pattern_countdown.validate("pattern_countdown")?;
        for (name, p) in [
            ("glitch_probability", self.glitch_probability),
            ("particle_probability", self.particle_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(FolioError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        if !(self.particle_lifespan_min > 0.0
            && self.particle_lifespan_min < self.particle_lifespan_max)
        {
            return Err(FolioError::validation(
                "particle lifespan expects 0 < min < max",
            ));
        }
        Ok(())
    }

    /// Load a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> FolioResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FolioError::serde(format!("parse animation config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/config.rs"]
mod tests;
