use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Terminal,
};
use tracing::debug;

use glide_core::animator::AnimatorConfigExt;
use glide_core::domain::Domain;
use glide_core::engine::Engine;
use glide_core::GlideConfig;
use glide_hosts::{EventSource, ProgressPlugin, TerminalInput};

use super::Rig;
use crate::ViewportArgs;

/// Poll timeout while nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What a key does outside of scrolling
enum Command {
    Quit,
    JumpStart,
    JumpEnd,
}

fn command_for(event: &Event) -> Option<Command> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Some(Command::JumpStart),
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => Some(Command::JumpEnd),
        _ => None,
    }
}

pub fn run(config: &GlideConfig, viewport: &ViewportArgs) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("glide"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config, viewport);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &GlideConfig,
    viewport: &ViewportArgs,
) -> Result<()> {
    let rig = Rig::new(config, viewport)?;
    let row_height = config.input.key_step.max(1.0);
    let rows = terminal.size()?.height.saturating_sub(5).max(1);

    let events: EventSource<Event> = EventSource::new();
    let input = TerminalInput::from_config(&events, &config.input)
        .with_page(f64::from(rows) * row_height);

    let progress = Rc::new(ProgressPlugin::new(|_| {}));
    let engine = rig
        .builder(config, viewport)
        .input(input)
        .shared_plugin(progress.clone())
        .build();
    engine.seed_initial_position(viewport.from);
    engine.init();

    let frame_interval = config.animator.frame_interval();
    let started = Instant::now();

    loop {
        let ratio = progress.last().unwrap_or(0.0);
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            let content = Paragraph::new(content_lines(
                engine.position(),
                row_height,
                layout[0].height.saturating_sub(2),
            ))
            .block(Block::default().borders(Borders::ALL).title(" glide "));
            frame.render_widget(content, layout[0]);

            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(" progress "))
                .gauge_style(Style::default().fg(Color::Cyan))
                .ratio(ratio.clamp(0.0, 1.0));
            frame.render_widget(gauge, layout[1]);

            frame.render_widget(Paragraph::new(status_line(&engine)), layout[2]);
        })?;

        let timeout = if rig.clock.is_pending() {
            frame_interval
        } else {
            IDLE_POLL
        };
        if event::poll(timeout)? {
            let event = event::read()?;
            match command_for(&event) {
                Some(Command::Quit) => break,
                Some(Command::JumpStart) => match ends(&rig.domain).0 {
                    Some(start) => engine.scroll_to(start, false),
                    None => debug!("domain has no start"),
                },
                Some(Command::JumpEnd) => match ends(&rig.domain).1 {
                    Some(end) => engine.scroll_to(end, false),
                    None => debug!("domain has no end"),
                },
                None => {
                    events.dispatch(&event);
                }
            }
        }

        if rig.clock.is_pending() {
            rig.clock.fire(started.elapsed().as_secs_f64() * 1000.0);
        }
    }

    engine.destroy();
    Ok(())
}

/// First and last reachable positions, where the domain has them
fn ends(domain: &Domain) -> (Option<f64>, Option<f64>) {
    match *domain {
        Domain::Bounded { min, max } => (Some(min), Some(max)),
        Domain::EndUnbounded { min } => (Some(min), None),
        Domain::AllUnbounded | Domain::Circular { .. } => (None, None),
    }
}

/// Numbered rows visible at `position`
fn content_lines(position: f64, row_height: f64, height: u16) -> Vec<Line<'static>> {
    let first = (position / row_height).floor() as i64;
    (0..i64::from(height))
        .map(|offset| {
            let row = first + offset;
            Line::from(format!("{:>8}  {}", row, "·".repeat(row.rem_euclid(32) as usize)))
        })
        .collect()
}

fn status_line(engine: &Engine) -> String {
    format!(
        " pos {:>9.1} | target {:>9.1} | vel {:>7.2} | {:?} | {:?} | q:quit j/k:step space:page g/G:ends ",
        engine.position(),
        engine.target(),
        engine.velocity(),
        engine.direction(),
        engine.origin()
    )
}
