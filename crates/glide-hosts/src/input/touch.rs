use std::cell::Cell;

use glide_core::config::InputConfig;
use glide_core::input::{Emitter, InputModule};
use glide_core::listeners::Subscription;

use super::Axis;
use crate::EventSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// Position of the primary touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: f64,
    pub y: f64,
}

impl TouchEvent {
    pub fn start(x: f64, y: f64) -> Self {
        Self {
            phase: TouchPhase::Start,
            x,
            y,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            phase: TouchPhase::Move,
            x,
            y,
        }
    }

    pub fn end() -> Self {
        Self {
            phase: TouchPhase::End,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Drag-to-scroll adapter. Dragging content up scrolls forward.
#[derive(Debug, Clone)]
pub struct TouchInput {
    source: EventSource<TouchEvent>,
    axis: Axis,
    multiplier: f64,
}

impl TouchInput {
    pub fn new(source: &EventSource<TouchEvent>) -> Self {
        Self::from_config(source, &InputConfig::default())
    }

    pub fn from_config(source: &EventSource<TouchEvent>, config: &InputConfig) -> Self {
        Self {
            source: source.clone(),
            axis: Axis::Block,
            multiplier: config.touch_multiplier,
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
}

impl InputModule for TouchInput {
    fn connect(self: Box<Self>, emitter: Emitter) -> Subscription {
        // position of the previous start or move, `None` between gestures
        let last: Cell<Option<f64>> = Cell::new(None);
        let source = self.source.clone();

        source.subscribe(move |event| {
            let position = self.axis.pick(event.x, event.y);
            match event.phase {
                TouchPhase::Start => last.set(Some(position)),
                TouchPhase::Move => {
                    // a move without a start has no reference point
                    if let Some(previous) = last.replace(Some(position)) {
                        emitter.emit(-(position - previous) * self.multiplier);
                    }
                }
                TouchPhase::End => last.set(None),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Emitter, Rc<RefCell<Vec<f64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (Emitter::new(move |d| sink.borrow_mut().push(d)), seen)
    }

    #[test]
    fn test_drag_up_scrolls_forward() {
        let source = EventSource::new();
        let (emitter, seen) = recorder();
        let _sub = Box::new(TouchInput::new(&source).with_multiplier(2.0)).connect(emitter);

        source.dispatch(&TouchEvent::start(0.0, 500.0));
        source.dispatch(&TouchEvent::moved(0.0, 480.0));
        source.dispatch(&TouchEvent::moved(0.0, 490.0));

        assert_eq!(*seen.borrow(), vec![40.0, -20.0]);
    }

    #[test]
    fn test_move_outside_gesture_is_ignored() {
        let source = EventSource::new();
        let (emitter, seen) = recorder();
        let _sub = Box::new(TouchInput::new(&source)).connect(emitter);

        source.dispatch(&TouchEvent::moved(0.0, 100.0));
        source.dispatch(&TouchEvent::start(0.0, 100.0));
        source.dispatch(&TouchEvent::end());
        source.dispatch(&TouchEvent::moved(0.0, 50.0));

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_detaches_from_source() {
        let source = EventSource::new();
        let (emitter, seen) = recorder();
        let sub = Box::new(TouchInput::new(&source).with_axis(Axis::Inline)).connect(emitter);

        source.dispatch(&TouchEvent::start(100.0, 0.0));
        source.dispatch(&TouchEvent::moved(90.0, 0.0));
        sub.unsubscribe();
        source.dispatch(&TouchEvent::moved(50.0, 0.0));

        assert_eq!(*seen.borrow(), vec![10.0]);
        assert_eq!(source.subscriber_count(), 0);
    }
}
