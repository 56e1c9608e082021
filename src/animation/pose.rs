use std::f64::consts::PI;

use crate::animation::state::Mode;
use crate::foundation::core::{Line, Point};

/// Joint positions of the stick figure for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub head: Point,
    pub shoulder: Point,
    pub hip: Point,
    pub left_elbow: Point,
    pub right_elbow: Point,
    pub left_hand: Point,
    pub right_hand: Point,
    pub left_knee: Point,
    pub right_knee: Point,
    pub left_foot: Point,
    pub right_foot: Point,
}

impl Pose {
    /// Closed-form pose for `mode` at clock `time`, anchored at `anchor` (the standing hip).
    ///
    /// `jitter` is called once per joint coordinate and its result is added to it. Right limbs
    /// lag the left ones by half a cycle and arms swing against legs.
    pub fn solve(
        mode: Mode,
        time: f64,
        anchor: Point,
        scale: f64,
        mut jitter: impl FnMut() -> f64,
    ) -> Self {
        let s = scale;
        let g = mode.gait(time);
        let leg_phase = time * g.leg_speed;
        let arm_phase = time * g.arm_speed;
        let (x, y) = (anchor.x, anchor.y);
        let lift = g.jump_height;

        let head = Point::new(
            x + jitter() * 0.2,
            y - 60.0 * s + (time * 6.0).sin() * g.vertical_bob + jitter() - lift,
        );
        let shoulder = Point::new(x, y - 45.0 * s + jitter() - lift);
        let hip = Point::new(x, y - lift);

        let mut knee = |phase: f64| {
            Point::new(
                x + phase.sin() * g.leg_amplitude * s + jitter(),
                y + 25.0 * s - phase.cos() * 10.0 * s + jitter() - lift,
            )
        };
        let left_knee = knee(leg_phase);
        let right_knee = knee(leg_phase + PI);

        let mut foot = |phase: f64| {
            Point::new(
                x + (phase - 0.5).sin() * g.leg_amplitude * 1.6 * s + jitter(),
                y + 55.0 * s + phase.sin().min(0.0) * 10.0 * s + jitter() - lift,
            )
        };
        let left_foot = foot(leg_phase);
        let right_foot = foot(leg_phase + PI);

        let hand_lift = arm_phase.sin().abs() * 10.0 * s;
        let mut arm = |phase: f64| {
            let elbow = Point::new(
                shoulder.x + phase.sin() * g.arm_amplitude * s + jitter(),
                shoulder.y + 20.0 * s + jitter(),
            );
            let hand = Point::new(
                shoulder.x + phase.sin() * g.arm_amplitude * 2.0 * s + jitter(),
                shoulder.y + 40.0 * s - hand_lift + jitter(),
            );
            (elbow, hand)
        };
        let (left_elbow, left_hand) = arm(arm_phase + PI);
        let (right_elbow, right_hand) = arm(arm_phase);

        Self {
            head,
            shoulder,
            hip,
            left_elbow,
            right_elbow,
            left_hand,
            right_hand,
            left_knee,
            right_knee,
            left_foot,
            right_foot,
        }
    }

    /// Bone segments: neck, spine, arms, then legs.
    pub fn bones(&self, head_radius: f64) -> [Line; 10] {
        let neck_top = Point::new(self.head.x, self.head.y + head_radius);
        [
            Line::new(neck_top, self.shoulder),
            Line::new(self.shoulder, self.hip),
            Line::new(self.shoulder, self.left_elbow),
            Line::new(self.left_elbow, self.left_hand),
            Line::new(self.shoulder, self.right_elbow),
            Line::new(self.right_elbow, self.right_hand),
            Line::new(self.hip, self.left_knee),
            Line::new(self.left_knee, self.left_foot),
            Line::new(self.hip, self.right_knee),
            Line::new(self.right_knee, self.right_foot),
        ]
    }

    pub fn joints(&self) -> [Point; 11] {
        [
            self.head,
            self.shoulder,
            self.left_elbow,
            self.right_elbow,
            self.left_hand,
            self.right_hand,
            self.hip,
            self.left_knee,
            self.right_knee,
            self.left_foot,
            self.right_foot,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pose.rs"]
mod tests;
