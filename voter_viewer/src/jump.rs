//! The jump state machine.
//!
//! A jump is a closed-form projectile curve.  Every frame the height is
//! recomputed from the time elapsed since take-off; nothing is accumulated
//! between frames, so a slow or irregular frame rate cannot make the figure
//! drift or land late.

use std::time::Instant;

use log::debug;

/// Take-off speed, scene units per second.  Tuned for looks, not physics.
pub const LAUNCH_SPEED: f32 = 5.0;
/// Downward acceleration, scene units per second squared.
pub const GRAVITY: f32 = 9.81;
/// Leg spread gained per second during the first part of the jump, degrees.
pub const SPREAD_RATE: f32 = 30.0;
/// Seconds after take-off at which the legs start closing again.
pub const SPREAD_PEAK_TIME: f32 = 0.5;

/// Vertical lift and leg spread at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpPose {
    pub height:     f32,
    /// Shared leg angle in degrees: left leg gets `-leg_spread`, right `+`.
    pub leg_spread: f32,
}

impl JumpPose {
    pub const GROUNDED: JumpPose = JumpPose { height: 0.0, leg_spread: 0.0 };
}

/// Raw curve at `t` seconds after take-off.  `height` goes negative past
/// [`airtime`]; [`Jump::sample`] is what turns that into a landing.
pub fn trajectory(t: f32) -> JumpPose {
    let height = LAUNCH_SPEED * t - 0.5 * GRAVITY * t * t;
    let leg_spread = if t <= SPREAD_PEAK_TIME {
        SPREAD_RATE * t
    } else if height > 0.0 {
        SPREAD_RATE - SPREAD_RATE * (t - SPREAD_PEAK_TIME)
    } else {
        0.0
    };
    JumpPose { height, leg_spread }
}

/// Seconds from take-off until the curve returns to the ground.
pub fn airtime() -> f32 {
    2.0 * LAUNCH_SPEED / GRAVITY
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    Jumping { started: Instant },
}

#[derive(Debug)]
pub struct Jump {
    state: JumpState,
}

impl Default for Jump {
    fn default() -> Self { Jump::new() }
}

impl Jump {
    pub fn new() -> Self {
        Jump { state: JumpState::Grounded }
    }

    pub fn state(&self) -> JumpState { self.state }

    pub fn is_jumping(&self) -> bool {
        matches!(self.state, JumpState::Jumping { .. })
    }

    /// Take off at `now`.  Returns false, and changes nothing, when already
    /// in the air.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.state = JumpState::Jumping { started: now };
        debug!("jump: take-off");
        true
    }

    /// Evaluate the pose at `now`, landing if the curve has reached the
    /// ground.  Height 0 counts as ground, so sampling at the take-off
    /// instant itself lands immediately.
    pub fn sample(&mut self, now: Instant) -> JumpPose {
        let JumpState::Jumping { started } = self.state else {
            return JumpPose::GROUNDED;
        };

        let t = now.saturating_duration_since(started).as_secs_f32();
        let pose = trajectory(t);
        if pose.height <= 0.0 {
            debug!("jump: landed after {:.3}s", t);
            self.state = JumpState::Grounded;
            return JumpPose::GROUNDED;
        }
        pose
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
