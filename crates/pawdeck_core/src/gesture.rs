//! Maps continuous drag input on the top card into discrete decisions.
//!
//! The interpreter owns the drag offset, the spring settle-back, and the
//! exit animation. The state machine mutation is deferred: a decision is
//! only reported from [`CardGesture::tick`] once the exit animation has
//! run to completion, so the deck always matches what is on screen.

use crate::Decision;

/// Horizontal displacement (logical px) beyond which a release decides.
const DECIDE_THRESHOLD: f32 = 88.0;
/// Horizontal fling velocity (px/ms) that decides regardless of distance.
const FLING_VELOCITY: f32 = 0.5;
/// Drag clamp: fraction of the viewport width.
const MAX_DRAG_X_RATIO: f32 = 0.35;
/// Drag clamp: vertical travel in logical px.
const MAX_DRAG_Y: f32 = 100.0;
/// Duration of the off-screen exit animation.
const EXIT_MS: f32 = 240.0;
/// The card flies to this multiple of the viewport width.
const EXIT_DISTANCE_RATIO: f32 = 1.2;
/// Rotation the card settles into while flying out.
const EXIT_ROTATION_DEG: f32 = 14.0;
/// Settle-back spring constants (per-second units).
const SPRING_STIFFNESS: f32 = 500.0;
const SPRING_DAMPING: f32 = 30.0;
/// Below these magnitudes the settle spring snaps to rest.
const SETTLE_EPS_PX: f32 = 0.5;
const SETTLE_EPS_VEL: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragOffset {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CardMotion {
    #[default]
    Rest,
    Dragging,
    Settling,
    Exiting {
        decision: Decision,
        elapsed_ms: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardGesture {
    offset: DragOffset,
    /// Spring integration state while settling, px/s.
    settle_velocity: DragOffset,
    /// Offset and rotation captured when the exit animation started.
    exit_from: DragOffset,
    exit_from_rotation: f32,
    motion: CardMotion,
}

impl CardGesture {
    /// Accumulates a pointer move. Ignored once the card is exiting.
    pub fn drag_by(&mut self, dx: f32, dy: f32, viewport_width: f32) {
        if matches!(self.motion, CardMotion::Exiting { .. }) {
            return;
        }
        let max_x = MAX_DRAG_X_RATIO * viewport_width.max(1.0);
        self.offset.x = (self.offset.x + dx).clamp(-max_x, max_x);
        self.offset.y = (self.offset.y + dy).clamp(-MAX_DRAG_Y, MAX_DRAG_Y);
        self.settle_velocity = DragOffset::default();
        self.motion = CardMotion::Dragging;
    }

    /// Resolves a pointer release into a decision or a settle-back.
    ///
    /// `velocity_x` is the horizontal pointer velocity at release in px/ms;
    /// a fling in a consistent direction decides even under the distance
    /// threshold. Releases without a preceding drag are ignored.
    pub fn release(&mut self, velocity_x: f32) {
        if self.motion != CardMotion::Dragging {
            return;
        }
        if self.offset.x > DECIDE_THRESHOLD || velocity_x > FLING_VELOCITY {
            self.start_exit(Decision::Like);
        } else if self.offset.x < -DECIDE_THRESHOLD || velocity_x < -FLING_VELOCITY {
            self.start_exit(Decision::Nope);
        } else {
            self.motion = CardMotion::Settling;
        }
    }

    /// External command path (buttons, keyboard). Ignored while an exit is
    /// already in flight so a double press cannot resolve two cards.
    pub fn command(&mut self, decision: Decision) {
        if matches!(self.motion, CardMotion::Exiting { .. }) {
            return;
        }
        self.start_exit(decision);
    }

    /// Advances animations by `dt_ms`. Returns the decision exactly once,
    /// when the exit animation completes; the caller then pops the card.
    pub fn tick(&mut self, dt_ms: f32, viewport_width: f32) -> Option<Decision> {
        let dt = (dt_ms / 1000.0).clamp(0.0, 0.25);
        match self.motion {
            CardMotion::Rest | CardMotion::Dragging => None,
            CardMotion::Settling => {
                self.step_spring(dt);
                None
            }
            CardMotion::Exiting {
                decision,
                elapsed_ms,
            } => {
                let elapsed_ms = elapsed_ms + dt_ms.max(0.0);
                let progress = (elapsed_ms / EXIT_MS).min(1.0);
                let eased = ease_out(progress);
                let target_x =
                    decision.direction() * EXIT_DISTANCE_RATIO * viewport_width.max(1.0);
                self.offset.x = lerp(self.exit_from.x, target_x, eased);
                if progress >= 1.0 {
                    return Some(decision);
                }
                self.motion = CardMotion::Exiting {
                    decision,
                    elapsed_ms,
                };
                None
            }
        }
    }

    pub fn offset(&self) -> DragOffset {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, CardMotion::Rest)
    }

    /// Rotation follows the horizontal offset linearly and is cosmetic only.
    pub fn rotation_deg(&self) -> f32 {
        if let CardMotion::Exiting {
            decision,
            elapsed_ms,
        } = self.motion
        {
            let eased = ease_out((elapsed_ms / EXIT_MS).min(1.0));
            return lerp(
                self.exit_from_rotation,
                decision.direction() * EXIT_ROTATION_DEG,
                eased,
            );
        }
        remap_clamped(self.offset.x, -300.0, 300.0, -15.0, 15.0)
    }

    /// Opacity of the LIKE hint overlay while dragging right.
    pub fn like_opacity(&self) -> f32 {
        remap_clamped(self.offset.x, 60.0, 140.0, 0.0, 1.0)
    }

    /// Opacity of the NOPE hint overlay while dragging left.
    pub fn nope_opacity(&self) -> f32 {
        remap_clamped(-self.offset.x, 60.0, 140.0, 0.0, 1.0)
    }

    /// Subtle grow/shrink with drag direction.
    pub fn scale(&self) -> f32 {
        if self.offset.x >= 0.0 {
            remap_clamped(self.offset.x, 0.0, 200.0, 1.0, 1.06)
        } else {
            remap_clamped(self.offset.x, -200.0, 0.0, 0.96, 1.0)
        }
    }

    fn start_exit(&mut self, decision: Decision) {
        self.exit_from = self.offset;
        self.exit_from_rotation = self.rotation_deg();
        self.motion = CardMotion::Exiting {
            decision,
            elapsed_ms: 0.0,
        };
    }

    // Semi-implicit Euler; stable enough at frame-sized steps for these
    // spring constants.
    fn step_spring(&mut self, dt: f32) {
        let accel_x = -SPRING_STIFFNESS * self.offset.x - SPRING_DAMPING * self.settle_velocity.x;
        let accel_y = -SPRING_STIFFNESS * self.offset.y - SPRING_DAMPING * self.settle_velocity.y;
        self.settle_velocity.x += accel_x * dt;
        self.settle_velocity.y += accel_y * dt;
        self.offset.x += self.settle_velocity.x * dt;
        self.offset.y += self.settle_velocity.y * dt;

        let at_rest = self.offset.x.abs() < SETTLE_EPS_PX
            && self.offset.y.abs() < SETTLE_EPS_PX
            && self.settle_velocity.x.abs() < SETTLE_EPS_VEL
            && self.settle_velocity.y.abs() < SETTLE_EPS_VEL;
        if at_rest {
            self.offset = DragOffset::default();
            self.settle_velocity = DragOffset::default();
            self.motion = CardMotion::Rest;
        }
    }
}

fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn remap_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
    lerp(out_min, out_max, t)
}
