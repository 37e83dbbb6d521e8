//! Frame pump abstraction

/// Callback run on the next frame with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Opaque identifier of a scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Arranges for a callback to run on the next tick.
///
/// At most one tick is pending: `start` while a tick is pending replaces the
/// pending callback. `start` must never run the callback synchronously, the
/// engine is mid-update when it schedules.
pub trait Scheduler {
    fn start(&mut self, callback: FrameCallback) -> FrameHandle;

    /// Cancel the pending tick, if any
    fn stop(&mut self);
}
