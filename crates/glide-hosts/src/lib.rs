pub mod event_source;
pub mod input;
pub mod plugins;
pub mod pump;

pub use event_source::EventSource;
pub use input::{Axis, TerminalInput, TouchInput, WheelInput};
pub use plugins::{ProgressPlugin, SnapPlugin, TracePlugin};
pub use pump::FramePump;
