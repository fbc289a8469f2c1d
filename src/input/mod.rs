//! Local keyboard input
//!
//! crossterm's event polling blocks, so keys are read on a dedicated thread
//! and forwarded to the driver as [`SimEvent`]s.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::command::{Command, Perturbation};
use crate::simulation::{EventSender, SimEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(150);

/// Map a key press to a simulation event
///
/// Letters trigger perturbations, space pauses, `m` switches mode and
/// `q`, Esc or Ctrl-C quit.
pub fn map_key(key: KeyEvent) -> Option<SimEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(SimEvent::Shutdown),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(SimEvent::Shutdown),
        KeyCode::Char(' ') => Some(SimEvent::Command(Command::TogglePause)),
        KeyCode::Char('m') => Some(SimEvent::Command(Command::ToggleMode)),
        KeyCode::Char(c) => Perturbation::from_key(c).map(SimEvent::Perturb),
        _ => None,
    }
}

/// Spawn the keyboard thread; it exits after sending `Shutdown` or once the
/// driver has gone away
pub fn spawn_keyboard(events: EventSender) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("keyboard input".into())
        .spawn(move || {
            if let Err(e) = read_keys(&events) {
                tracing::warn!("Keyboard input stopped: {}", e);
            }
        })
}

fn read_keys(events: &EventSender) -> io::Result<()> {
    loop {
        if events.is_closed() {
            return Ok(());
        }
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if let Some(sim_event) = map_key(key) {
                let quit = sim_event == SimEvent::Shutdown;
                if events.send(sim_event).is_err() || quit {
                    return Ok(());
                }
            }
        }
    }
}
