use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use glide_core::config::InputConfig;
use glide_core::input::{Emitter, InputModule};
use glide_core::listeners::Subscription;
use tracing::trace;

use crate::EventSource;

/// Keyboard and mouse wheel adapter for crossterm terminals
///
/// Arrow keys, `j`/`k` and wheel notches move one step; Page Up/Down,
/// `Ctrl+f`/`Ctrl+b` and space move one page; `Ctrl+d`/`Ctrl+u` move half a
/// page. Absolute jumps (Home, End) are left to the host.
#[derive(Debug, Clone)]
pub struct TerminalInput {
    source: EventSource<Event>,
    step: f64,
    page: f64,
}

impl TerminalInput {
    pub fn new(source: &EventSource<Event>) -> Self {
        Self::from_config(source, &InputConfig::default())
    }

    pub fn from_config(source: &EventSource<Event>, config: &InputConfig) -> Self {
        Self {
            source: source.clone(),
            step: config.key_step * config.wheel_multiplier,
            page: config.page_step,
        }
    }

    /// Distance scrolled by one page, usually the viewport height
    pub fn with_page(mut self, page: f64) -> Self {
        self.page = page;
        self
    }

    /// Scroll delta for `event`, `None` when the event does not scroll
    pub fn delta(&self, event: &Event) -> Option<f64> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.key_delta(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => Some(self.step),
                MouseEventKind::ScrollUp => Some(-self.step),
                _ => None,
            },
            _ => None,
        }
    }

    fn key_delta(&self, key: &KeyEvent) -> Option<f64> {
        match (key.code, key.modifiers) {
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Some(self.step),
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Some(-self.step),

            (KeyCode::PageDown, _)
            | (KeyCode::Char(' '), KeyModifiers::NONE)
            | (KeyCode::Char('f'), KeyModifiers::CONTROL) => Some(self.page),
            (KeyCode::PageUp, _) | (KeyCode::Char('b'), KeyModifiers::CONTROL) => {
                Some(-self.page)
            }

            (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(self.page / 2.0),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(-self.page / 2.0),
            _ => None,
        }
    }
}

impl InputModule for TerminalInput {
    fn connect(self: Box<Self>, emitter: Emitter) -> Subscription {
        let source = self.source.clone();
        source.subscribe(move |event| {
            if let Some(delta) = self.delta(event) {
                trace!(delta, "terminal scroll");
                emitter.emit(delta);
            }
        })
    }
}
