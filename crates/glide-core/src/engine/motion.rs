use crate::plugin::Direction;
use crate::signal::Origin;

/// Engine-private motion and lifecycle state
#[derive(Debug, Default)]
pub(super) struct MotionState {
    /// Where the loop is steering; off the canonical range on circular domains
    pub target: f64,
    /// Raw position tracked continuously across circular wraps
    pub motion_value: f64,
    /// Deltas received since the last tick
    pub impulse: f64,
    pub velocity: f64,
    pub direction: Direction,
    /// Previous committed signal value, for velocity
    pub prev: f64,
    /// Origin tagged on positions written by the loop
    pub cause: Origin,
    pub running: bool,
    pub initialized: bool,
    pub destroyed: bool,
}

impl MotionState {
    /// Put every motion field at `position` with no velocity
    pub fn reset_to(&mut self, position: f64) {
        self.target = position;
        self.motion_value = position;
        self.prev = position;
        self.impulse = 0.0;
        self.velocity = 0.0;
        self.direction = Direction::Still;
    }
}
