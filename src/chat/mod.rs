//! External command feeds
//!
//! Feeds turn raw text into typed commands at the boundary; only
//! [`SimEvent`]s cross into the simulation.

pub mod irc;
pub mod lines;

pub use irc::{ChatClient, IrcMessage};
pub use lines::forward_lines;

use crate::command::{parse_line, Request};
use crate::simulation::{EventSender, SimEvent};

/// What became of one line of chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A command was queued for the simulation
    Forwarded,
    /// The sender asked for help; the feed answers it
    Help,
    /// Not a command
    Ignored,
    /// The simulation has stopped
    Closed,
}

/// Parse `line` and queue the resulting command
pub fn dispatch(line: &str, events: &EventSender) -> Dispatch {
    match parse_line(line) {
        Some(Request::Apply(command)) => match events.send(SimEvent::Command(command)) {
            Ok(()) => Dispatch::Forwarded,
            Err(_) => Dispatch::Closed,
        },
        Some(Request::Help) => Dispatch::Help,
        None => Dispatch::Ignored,
    }
}
