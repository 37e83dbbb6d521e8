use glide_core::config::InputConfig;
use glide_core::input::{Emitter, InputModule};
use glide_core::listeners::Subscription;
use tracing::trace;

use super::Axis;
use crate::EventSource;

/// Unit of a wheel event's deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub mode: DeltaMode,
}

impl WheelEvent {
    /// Vertical wheel movement in pixels
    pub fn pixels(delta_y: f64) -> Self {
        Self {
            delta_y,
            ..Self::default()
        }
    }

    /// Vertical wheel movement in lines
    pub fn lines(delta_y: f64) -> Self {
        Self {
            delta_y,
            mode: DeltaMode::Line,
            ..Self::default()
        }
    }
}

/// Mouse wheel and trackpad adapter
#[derive(Debug, Clone)]
pub struct WheelInput {
    source: EventSource<WheelEvent>,
    axis: Axis,
    line_height: f64,
    page_size: f64,
    multiplier: f64,
}

impl WheelInput {
    pub fn new(source: &EventSource<WheelEvent>) -> Self {
        Self::from_config(source, &InputConfig::default())
    }

    pub fn from_config(source: &EventSource<WheelEvent>, config: &InputConfig) -> Self {
        Self {
            source: source.clone(),
            axis: Axis::Block,
            line_height: config.wheel_line_height,
            page_size: config.wheel_page_size,
            multiplier: config.wheel_multiplier,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Viewport extent used for page-mode deltas
    pub fn with_page_size(mut self, page_size: f64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Scroll delta in pixels for `event`
    pub fn delta(&self, event: &WheelEvent) -> f64 {
        let unit = match event.mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => self.line_height,
            DeltaMode::Page => self.page_size,
        };
        self.axis.pick(event.delta_x, event.delta_y) * unit * self.multiplier
    }
}

impl InputModule for WheelInput {
    fn connect(self: Box<Self>, emitter: Emitter) -> Subscription {
        let source = self.source.clone();
        source.subscribe(move |event| {
            let delta = self.delta(event);
            if delta != 0.0 {
                trace!(delta, mode = ?event.mode, "wheel");
                emitter.emit(delta);
            }
        })
    }
}
