pub mod animator;
pub mod config;
pub mod domain;
pub mod driver;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod listeners;
pub mod plugin;
pub mod scheduler;
pub mod signal;

pub use animator::{Animator, AnimatorStep, ExponentialAnimator, InstantAnimator, TweenAnimator};
pub use config::{AnimatorConfig, AnimatorKind, EasingType, EngineSettings, GlideConfig, InputConfig, SnapConfig};
pub use domain::Domain;
pub use driver::Driver;
pub use engine::{Engine, EngineBuilder, EngineHandle};
pub use error::{Error, Result};
pub use host::{ManualScheduler, VirtualDriver};
pub use input::{Emitter, InputModule};
pub use listeners::Subscription;
pub use plugin::{Direction, FrameInfo, Plugin, SettleInfo};
pub use scheduler::Scheduler;
pub use signal::{Origin, ScrollSignal};
