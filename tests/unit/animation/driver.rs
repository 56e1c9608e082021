use super::*;
use crate::animation::config::AnimationConfig;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::FrameIndex;
use crate::foundation::rng::{Rng64, ScriptedRandom};
use crate::render::backend::RenderSettings;
use crate::render::cpu::CpuRenderer;
use std::sync::mpsc;
use std::time::Duration;

fn viewport() -> Canvas {
    Canvas {
        width: 64,
        height: 48,
    }
}

#[test]
fn flags_are_shared_between_clones() {
    let flags = DisplayFlags::new(viewport(), true);
    let shell_side = flags.clone();
    shell_side.set_dark(false);
    shell_side.set_viewport(Canvas {
        width: 10,
        height: 20,
    });
    let snap = flags.snapshot();
    assert!(!snap.dark);
    assert_eq!(snap.viewport, Canvas { width: 10, height: 20 });
}

#[test]
fn loop_publishes_frames_in_order_and_stops() {
    let flags = DisplayFlags::new(viewport(), true);
    let engine = AnimationEngine::with_rng(
        AnimationConfig::default(),
        flags.snapshot(),
        ScriptedRandom::constant(0.99),
    );
    let (tx, rx) = mpsc::channel();
    let running = AnimationLoop::spawn(engine, flags, Fps::new(240, 1).unwrap(), move |f| {
        let _ = tx.send(f.frame);
    })
    .unwrap();

    let first: Vec<FrameIndex> = (0..3)
        .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
        .collect();
    assert_eq!(first, [FrameIndex(0), FrameIndex(1), FrameIndex(2)]);
    assert!(running.ticks() >= 3);

    running.stop().unwrap();
    while rx.try_recv().is_ok() {}
    // The sender lives in the joined thread, so the channel is closed.
    assert!(matches!(
        rx.try_recv(),
        Err(mpsc::TryRecvError::Disconnected)
    ));
}

#[test]
fn dropping_the_loop_joins_it() {
    let flags = DisplayFlags::new(viewport(), false);
    let engine = AnimationEngine::with_rng(AnimationConfig::default(), flags.snapshot(), Rng64::new(1));
    let (tx, rx) = mpsc::channel::<()>();
    let running = AnimationLoop::spawn(engine, flags, Fps::new(60, 1).unwrap(), move |_| {
        let _ = tx.send(());
    })
    .unwrap();
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    drop(running);
    while rx.try_recv().is_ok() {}
    assert!(matches!(
        rx.try_recv(),
        Err(mpsc::TryRecvError::Disconnected)
    ));
}

#[test]
fn offline_run_pushes_every_frame() {
    let input = TickInput {
        viewport: viewport(),
        dark: true,
    };
    let mut engine = AnimationEngine::with_rng(AnimationConfig::default(), input, Rng64::new(7));
    let mut renderer = CpuRenderer::new(RenderSettings::default()).unwrap();
    let mut sink = InMemorySink::new();
    engine
        .run(5, input, Fps::new(30, 1).unwrap(), &mut renderer, &mut sink)
        .unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config().map(|c| c.width), Some(64));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, [0, 1, 2, 3, 4]);
    assert!(sink.frames().iter().all(|(_, f)| f.data.len() == 64 * 48 * 4));
    assert_eq!(engine.state().frame, FrameIndex(5));
}
