use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::rng::ScriptedRandom;
use crate::render::draw::DrawCommand;

fn input(width: u32, height: u32) -> TickInput {
    TickInput {
        viewport: Canvas { width, height },
        dark: true,
    }
}

/// 0.99 never triggers a glitch or a particle, so each tick only draws the confidence sample.
fn calm() -> ScriptedRandom {
    ScriptedRandom::constant(0.99)
}

#[test]
fn walker_mounts_left_of_viewport_on_baseline() {
    let engine = AnimationEngine::with_rng(AnimationConfig::default(), input(800, 600), calm());
    let s = engine.state();
    assert_eq!(s.position.x, -100.0);
    assert_eq!(s.position.y, 360.0);
    assert_eq!(s.direction, Direction::Right);
    assert_eq!(s.mode, crate::animation::state::Mode::Walk);
}

#[test]
fn turns_around_exactly_at_the_right_bound() {
    let mut engine = AnimationEngine::with_rng(AnimationConfig::default(), input(200, 400), calm());
    let mut prev_x = engine.state().position.x;
    let mut flipped_at = None;
    for tick in 0..200 {
        engine.tick(input(200, 400));
        let s = engine.state();
        assert!(s.position.x <= 300.0);
        if s.direction == Direction::Left {
            assert_eq!(s.position.x, 300.0);
            assert!(prev_x + 2.5 > 300.0);
            flipped_at = Some(tick);
            break;
        }
        prev_x = s.position.x;
    }
    assert!(flipped_at.is_some());
    engine.tick(input(200, 400));
    assert_eq!(engine.state().position.x, 297.5);
}

#[test]
fn shrinking_viewport_clamps_walker_into_band() {
    let mut engine = AnimationEngine::with_rng(AnimationConfig::default(), input(1000, 400), calm());
    for _ in 0..200 {
        engine.tick(input(1000, 400));
    }
    assert!(engine.state().position.x > 300.0);
    engine.tick(input(100, 400));
    assert_eq!(engine.state().position.x, 200.0);
    assert_eq!(engine.state().direction, Direction::Left);
}

#[test]
fn countdowns_rearm_within_range_only_at_zero() {
    let cfg = AnimationConfig {
        mode_countdown: CountdownRange {
            initial: 3,
            min: 200,
            max: 600,
        },
        pattern_countdown: CountdownRange {
            initial: 2,
            min: 400,
            max: 1000,
        },
        ..AnimationConfig::default()
    };
    let mut engine = AnimationEngine::with_rng(cfg, input(800, 600), Rng64::new(11));
    engine.tick(input(800, 600));
    assert_eq!(engine.state().mode_countdown, 2);
    assert_eq!(engine.state().pattern_countdown, 1);
    engine.tick(input(800, 600));
    let p = engine.state().pattern_countdown;
    assert!((400..1000).contains(&p), "pattern countdown {p}");
    assert_eq!(engine.state().mode_countdown, 1);
    engine.tick(input(800, 600));
    let m = engine.state().mode_countdown;
    assert!((200..600).contains(&m), "mode countdown {m}");
    assert_eq!(engine.state().pattern_countdown, p - 1);
}

#[test]
fn mode_draw_is_weighted_toward_walk() {
    let cfg = AnimationConfig {
        mode_countdown: CountdownRange {
            initial: 1,
            min: 200,
            max: 600,
        },
        ..AnimationConfig::default()
    };
    // Draw order on the first tick: mode pick, mode re-arm, glitch, particle, confidence.
    let rng = ScriptedRandom::new(vec![0.3, 0.5, 0.99, 0.99, 0.5]);
    let mut engine = AnimationEngine::with_rng(cfg.clone(), input(800, 600), rng);
    engine.tick(input(800, 600));
    assert_eq!(engine.state().mode, crate::animation::state::Mode::Walk);
    assert_eq!(engine.state().mode_countdown, 400);

    let rng = ScriptedRandom::new(vec![0.9, 0.0, 0.99, 0.99, 0.5]);
    let mut engine = AnimationEngine::with_rng(cfg, input(800, 600), rng);
    engine.tick(input(800, 600));
    assert_eq!(engine.state().mode, crate::animation::state::Mode::Dance);
    assert_eq!(engine.state().mode_countdown, 200);
}

#[test]
fn glitch_episode_lasts_configured_ticks() {
    let mut engine = AnimationEngine::with_rng(
        AnimationConfig::default(),
        input(800, 600),
        ScriptedRandom::constant(0.001),
    );
    for i in 0..60 {
        let frame = engine.tick(input(800, 600));
        assert!(frame.readout.glitching, "tick {i}");
        assert_eq!(frame.readout.warning(), Some(crate::animation::scene::TRACKING_LOST));
        assert!(frame.readout.confidence < 0.2);
    }
    assert_eq!(engine.state().glitch_countdown, 0);
}

#[test]
fn glitch_frames_switch_to_alert_and_drop_glow() {
    let mut engine = AnimationEngine::with_rng(
        AnimationConfig::default(),
        input(800, 600),
        ScriptedRandom::constant(0.001),
    );
    let frame = engine.tick(input(800, 600));
    let alert = crate::foundation::core::Rgba8::hex(0xef4444);
    assert!(
        !frame
            .draw
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Glow { .. }))
    );
    let bones: Vec<_> = frame
        .draw
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(bones.len(), 10);
    assert!(bones.iter().all(|c| *c == alert));
    assert!(frame.draw.texts().any(|t| t.contains("TRACKING LOST")));
}

#[test]
fn calm_frame_readout() {
    let mut engine = AnimationEngine::with_rng(AnimationConfig::default(), input(800, 600), calm());
    let frame = engine.tick(input(800, 600));
    assert!(!frame.readout.glitching);
    assert!((0.95..0.99).contains(&frame.readout.confidence));
    let texts: Vec<_> = frame.draw.texts().collect();
    assert_eq!(texts, ["ID: WALKER_01", "WALK | HORIZONTAL", "CONF: 0.99"]);
}

#[test]
fn particles_expire_and_stay_bounded() {
    let mut engine =
        AnimationEngine::with_rng(AnimationConfig::default(), input(800, 600), Rng64::new(5));
    let mut max_len = 0;
    for _ in 0..5_000 {
        engine.tick(input(800, 600));
        let s = engine.state();
        assert!(s.particles.iter().all(|p| p.age <= p.lifespan));
        max_len = max_len.max(s.particles.len());
    }
    assert!(max_len > 0);
    assert!(max_len <= 61, "max particles {max_len}");
}

#[test]
fn spawned_particle_starts_at_the_feet_and_falls_back() {
    // glitch: no; particle: yes; x, y, vx centered at 0.5; vy draw 0.0; lifespan draw 0.0.
    let rng = ScriptedRandom::new(vec![0.99, 0.0, 0.5, 0.5, 0.5, 0.0, 0.0, 0.5]);
    let mut engine = AnimationEngine::with_rng(AnimationConfig::default(), input(800, 600), rng);
    engine.tick(input(800, 600));
    let s = engine.state();
    assert_eq!(s.particles.len(), 1);
    let p = s.particles[0];
    assert_eq!(p.age, 2.0);
    assert_eq!(p.lifespan, 30.0);
    assert!((p.velocity.y - (-1.0 + 0.1)).abs() < 1e-12);
    assert!((p.position.x - s.position.x).abs() < 1e-12);
    assert!((p.position.y - (s.position.y + 50.0 - 1.0)).abs() < 1e-12);
}

#[test]
fn theme_changes_colors_but_not_kinematics() {
    let dark = input(800, 600);
    let light = TickInput { dark: false, ..dark };
    let mut a = AnimationEngine::with_rng(AnimationConfig::default(), dark, Rng64::new(42));
    let mut b = AnimationEngine::with_rng(AnimationConfig::default(), light, Rng64::new(42));
    for _ in 0..300 {
        let fa = a.tick(dark);
        let fb = b.tick(light);
        assert_eq!(fa.pose, fb.pose);
        assert_eq!(fa.readout, fb.readout);
        assert_eq!(fa.draw.len(), fb.draw.len());
    }
    assert_eq!(a.state(), b.state());
    let fa = a.tick(dark);
    let fb = b.tick(light);
    assert_ne!(fa.draw, fb.draw);
}

#[test]
fn baseline_follows_viewport_height() {
    let mut engine = AnimationEngine::with_rng(AnimationConfig::default(), input(800, 600), calm());
    engine.tick(input(800, 1000));
    let y = engine.state().position.y;
    assert!((y - 600.0).abs() <= 10.0, "y = {y}");
}

#[test]
fn zero_viewport_degrades_without_panicking() {
    let mut engine =
        AnimationEngine::with_rng(AnimationConfig::default(), input(0, 0), Rng64::new(3));
    for _ in 0..100 {
        let f = engine.tick(input(0, 0));
        assert!(f.pose.head.x.is_finite());
    }
    let x = engine.state().position.x;
    assert!((-100.0..=100.0).contains(&x));
}
