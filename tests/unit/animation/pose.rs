use super::*;

fn still(mode: Mode, time: f64) -> Pose {
    Pose::solve(mode, time, Point::new(100.0, 300.0), 1.2, || 0.0)
}

#[test]
fn left_and_right_limbs_are_half_a_cycle_apart() {
    for t in [0.0, 0.37, 1.5, 12.25] {
        let p = still(Mode::Walk, t);
        let l = p.left_knee.x - p.hip.x;
        let r = p.right_knee.x - p.hip.x;
        assert!((l + r).abs() < 1e-9, "t={t}: {l} vs {r}");
        let le = p.left_elbow.x - p.shoulder.x;
        let re = p.right_elbow.x - p.shoulder.x;
        assert!((le + re).abs() < 1e-9);
    }
}

#[test]
fn walk_pose_at_time_zero() {
    let p = still(Mode::Walk, 0.0);
    assert_eq!(p.hip, Point::new(100.0, 300.0));
    assert!((p.head.y - (300.0 - 72.0)).abs() < 1e-9);
    assert!((p.shoulder.y - (300.0 - 54.0)).abs() < 1e-9);
    // cos(0) = 1 pulls the knee up by 10 * scale.
    assert!((p.left_knee.y - (300.0 + 30.0 - 12.0)).abs() < 1e-9);
    assert!((p.left_foot.y - (300.0 + 66.0)).abs() < 1e-9);
}

#[test]
fn jump_lifts_the_whole_figure() {
    let t = std::f64::consts::FRAC_PI_4;
    let ground = still(Mode::Walk, t);
    let air = still(Mode::Jump, t);
    let lift = (t * 2.0).sin().abs() * 80.0;
    assert!((ground.hip.y - air.hip.y - lift).abs() < 1e-9);
    assert!(air.shoulder.y < ground.shoulder.y);
}

#[test]
fn jitter_is_sampled_once_per_coordinate() {
    let mut calls = 0;
    let _ = Pose::solve(Mode::Run, 2.0, Point::ZERO, 1.2, || {
        calls += 1;
        0.0
    });
    assert_eq!(calls, 19);
}

#[test]
fn jitter_moves_joints() {
    let calm = still(Mode::Dance, 3.0);
    let noisy = Pose::solve(Mode::Dance, 3.0, Point::new(100.0, 300.0), 1.2, || 10.0);
    assert_ne!(calm.head, noisy.head);
    assert_ne!(calm.left_hand, noisy.left_hand);
    // The hip is the anchor and never jitters.
    assert_eq!(calm.hip, noisy.hip);
}

#[test]
fn skeleton_topology() {
    let p = still(Mode::Walk, 1.0);
    assert_eq!(p.joints().len(), 11);
    let bones = p.bones(9.6);
    assert_eq!(bones[1].p0, p.shoulder);
    assert_eq!(bones[1].p1, p.hip);
    assert!((bones[0].p0.y - (p.head.y + 9.6)).abs() < 1e-12);
}
