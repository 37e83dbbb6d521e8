//! Ready-made engine plugins

pub mod progress;
pub mod snap;
pub mod trace;

pub use progress::ProgressPlugin;
pub use snap::SnapPlugin;
pub use trace::TracePlugin;
