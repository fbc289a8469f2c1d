//! Plain IRC chat feed (Twitch chat speaks this on port 6667)
//!
//! Joins the configured channels, forwards `!` commands from other users
//! and answers `!help` in the channel it was asked in. A dropped
//! connection is retried with a doubling delay; a refused login is final.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::chat::{dispatch, Dispatch};
use crate::command::HELP_TEXT;
use crate::core::config::ChatConfig;
use crate::core::error::{LifeError, Result};
use crate::simulation::EventSender;

/// One parsed IRC protocol line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcMessage<'a> {
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: Vec<&'a str>,
    pub trailing: Option<&'a str>,
}

impl<'a> IrcMessage<'a> {
    /// Parse `[@tags ][:prefix ]COMMAND params [:trailing]`
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut rest = line.trim_end_matches(|c| c == '\r' || c == '\n');

        if let Some(tagged) = rest.strip_prefix('@') {
            rest = tagged.split_once(' ')?.1;
        }

        let prefix = match rest.strip_prefix(':') {
            Some(prefixed) => {
                let (prefix, remainder) = prefixed.split_once(' ')?;
                rest = remainder;
                Some(prefix)
            }
            None => None,
        };

        let (head, trailing) = match rest.split_once(" :") {
            Some((head, trailing)) => (head, Some(trailing)),
            None => (rest, None),
        };

        let mut parts = head.split_whitespace();
        let command = parts.next()?;
        Some(Self {
            prefix,
            command,
            params: parts.collect(),
            trailing,
        })
    }

    /// Nickname part of the prefix (`nick!user@host`)
    pub fn nick(&self) -> Option<&'a str> {
        self.prefix.and_then(|p| p.split('!').next())
    }
}

/// What the client should do after handling a server line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nothing,
    Send(String),
    LoggedIn,
    Stop,
}

/// Reconnect delay that doubles after every failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(60))
    }
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            current: initial,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    /// Back to the initial delay, after a successful login
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

pub struct ChatClient {
    server: String,
    nick: String,
    token: String,
    channels: Vec<String>,
    backoff: Backoff,
}

impl ChatClient {
    pub fn from_config(config: &ChatConfig) -> Result<Self> {
        let token = config
            .resolved_token()
            .ok_or_else(|| LifeError::Chat("no chat token configured".into()))?;
        Ok(Self {
            server: config.server.clone(),
            nick: config.nick.to_lowercase(),
            token,
            channels: config.channels.iter().map(|c| normalize_channel(c)).collect(),
            backoff: Backoff::default(),
        })
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Registration and join lines sent right after connecting
    pub fn login_lines(&self) -> Vec<String> {
        let pass = if self.token.starts_with("oauth:") {
            self.token.clone()
        } else {
            format!("oauth:{}", self.token)
        };
        let mut lines = vec![format!("PASS {}", pass), format!("NICK {}", self.nick)];
        lines.extend(self.channels.iter().map(|c| format!("JOIN {}", c)));
        lines
    }

    /// React to one server line
    pub fn respond(&self, message: &IrcMessage<'_>, events: &EventSender) -> Result<Reply> {
        match message.command {
            "PING" => Ok(Reply::Send(format!(
                "PONG :{}",
                message.trailing.unwrap_or_default()
            ))),
            "001" => Ok(Reply::LoggedIn),
            "NOTICE" if message.trailing.is_some_and(is_auth_failure) => Err(LifeError::ChatAuth(
                message.trailing.unwrap_or_default().to_string(),
            )),
            "PRIVMSG" => {
                let (Some(channel), Some(text)) = (message.params.first(), message.trailing) else {
                    return Ok(Reply::Nothing);
                };
                if message.nick().is_some_and(|n| n.eq_ignore_ascii_case(&self.nick)) {
                    return Ok(Reply::Nothing);
                }
                tracing::debug!("{} {}: {}", channel, message.nick().unwrap_or("?"), text);
                Ok(match dispatch(text, events) {
                    Dispatch::Help => Reply::Send(format!("PRIVMSG {} :{}", channel, HELP_TEXT)),
                    Dispatch::Closed => Reply::Stop,
                    Dispatch::Forwarded | Dispatch::Ignored => Reply::Nothing,
                })
            }
            _ => Ok(Reply::Nothing),
        }
    }

    /// Stay connected until the simulation goes away
    ///
    /// Lost connections are retried after [`Backoff`] delays. Only a refused
    /// login ends the feed with an error.
    pub async fn run(mut self, events: EventSender) -> Result<()> {
        loop {
            match self.session(&events).await {
                Ok(()) => return Ok(()),
                Err(e @ LifeError::ChatAuth(_)) => return Err(e),
                Err(e) => {
                    if events.is_closed() {
                        return Ok(());
                    }
                    let delay = self.backoff.next_delay();
                    tracing::warn!("Chat connection lost ({}), retrying in {:?}", e, delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// One connection, pumped until the server or the simulation goes away
    async fn session(&mut self, events: &EventSender) -> Result<()> {
        tracing::info!("Connecting to chat at {}", self.server);
        let stream = TcpStream::connect(&self.server).await?;
        let (reader, mut writer) = stream.into_split();

        for line in self.login_lines() {
            send_line(&mut writer, &line).await?;
        }
        tracing::info!("Joined {}", self.channels.join(", "));

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            let Some(message) = IrcMessage::parse(&line) else {
                continue;
            };
            match self.respond(&message, events)? {
                Reply::Nothing => {}
                Reply::Send(out) => send_line(&mut writer, &out).await?,
                Reply::LoggedIn => {
                    tracing::info!("Logged in as {}", self.nick);
                    self.backoff.reset();
                }
                Reply::Stop => return Ok(()),
            }
        }

        Err(LifeError::Chat("connection closed by server".into()))
    }
}

async fn send_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await?;
    Ok(())
}

fn normalize_channel(name: &str) -> String {
    let name = name.trim().trim_start_matches('#').to_lowercase();
    format!("#{}", name)
}

fn is_auth_failure(text: &str) -> bool {
    text.contains("Login authentication failed") || text.contains("Improperly formatted auth")
}
