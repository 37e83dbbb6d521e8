//! Input adapters
//!
//! Each adapter subscribes to an [`EventSource`](crate::EventSource) of raw
//! host events when the engine connects it, and turns those events into
//! signed scroll deltas. Positive deltas move forward (down or right).

pub mod terminal;
pub mod touch;
pub mod wheel;

pub use terminal::TerminalInput;
pub use touch::{TouchEvent, TouchInput, TouchPhase};
pub use wheel::{DeltaMode, WheelEvent, WheelInput};

/// Scroll axis an adapter reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Vertical
    #[default]
    Block,
    /// Horizontal
    Inline,
}

impl Axis {
    /// Pick the component of `(x, y)` along this axis
    #[inline]
    pub fn pick(self, x: f64, y: f64) -> f64 {
        match self {
            Axis::Block => y,
            Axis::Inline => x,
        }
    }
}
