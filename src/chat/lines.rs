//! Line-per-command feed over any async reader (stdin, sockets, test buffers)

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::chat::{dispatch, Dispatch};
use crate::command::HELP_TEXT;
use crate::core::error::Result;
use crate::simulation::EventSender;

/// Forward every command line from `reader` until EOF
///
/// Help requests are answered through the log. Returns how many commands
/// were queued.
pub async fn forward_lines<R>(reader: R, events: EventSender) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;

    while let Some(line) = lines.next_line().await? {
        tracing::debug!("input: {}", line);
        match dispatch(&line, &events) {
            Dispatch::Forwarded => forwarded += 1,
            Dispatch::Help => tracing::info!("{}", HELP_TEXT),
            Dispatch::Ignored => {}
            Dispatch::Closed => break,
        }
    }

    Ok(forwarded)
}
