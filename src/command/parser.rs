//! Chat line grammar
//!
//! Lines are split on whitespace into at most three tokens, the last one
//! holding whatever remains. Malformed numbers become 0 and are clamped
//! later; anything that is not a known command is dropped.

use std::num::IntErrorKind;

use crate::core::types::Probability;
use crate::rules::RuleSpec;

/// Maximum number of tokens a command line is split into
pub const MAX_TOKENS: usize = 3;

/// Reply sent for `!help`
pub const HELP_TEXT: &str = "➤ !b [0-1]: share of cells to bring to life \
➤ !d [0-1]: share of cells to kill \
➤ !r [0-1]: restart with this share of cells alive \
➤ !s x y / !u x y: set or unset the cell at column x, row y (e.g. !s 100 50) \
➤ !p: pause/unpause \
➤ !x: switch between the rule laboratory and classic Life on the whole board \
➤ !l [rule]: change the rule, classic is !l B3S23";

/// A state mutation requested from outside
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ToggleMode,
    TogglePause,
    SetRule(RuleSpec),
    ResetWithDensity(Probability),
    BirthBurst(Probability),
    DeathBurst(Probability),
    /// Raw coordinates; clamped onto the board when applied
    SetCell { x: i64, y: i64 },
    ClearCell { x: i64, y: i64 },
}

/// Anything a chat line can ask for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Apply(Command),
    Help,
}

/// Parse one chat line; `None` for anything that is not a command
pub fn parse_line(line: &str) -> Option<Request> {
    let tokens = tokenize(line);
    let (&name, args) = tokens.split_first()?;

    let probability = || Probability::parse_lenient(args[0]);

    let request = match (name, args.len()) {
        ("!help", _) => Request::Help,
        ("!x", 0) => Request::Apply(Command::ToggleMode),
        ("!p", 0) => Request::Apply(Command::TogglePause),
        ("!l", 1..) => Request::Apply(Command::SetRule(RuleSpec::parse(args[0]))),
        ("!r", 1..) => Request::Apply(Command::ResetWithDensity(probability())),
        ("!b", 1..) => Request::Apply(Command::BirthBurst(probability())),
        ("!d", 1..) => Request::Apply(Command::DeathBurst(probability())),
        ("!s", 1..) => {
            let (x, y) = coordinates(args);
            Request::Apply(Command::SetCell { x, y })
        }
        ("!u", 1..) => {
            let (x, y) = coordinates(args);
            Request::Apply(Command::ClearCell { x, y })
        }
        _ => {
            tracing::debug!("Ignoring chat line {:?}", line);
            return None;
        }
    };

    Some(request)
}

/// Split into at most [`MAX_TOKENS`] tokens; the last keeps the remainder
fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(MAX_TOKENS);
    let mut rest = line.trim();

    while !rest.is_empty() {
        if tokens.len() == MAX_TOKENS - 1 {
            tokens.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                tokens.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                tokens.push(rest);
                break;
            }
        }
    }

    tokens
}

fn coordinates(args: &[&str]) -> (i64, i64) {
    let parse = |i: usize| args.get(i).map_or(0, |t| coordinate(t));
    (parse(0), parse(1))
}

/// Integer too large in either direction saturates so it clamps to the far edge
fn coordinate(token: &str) -> i64 {
    match token.trim().parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_line(line) {
            Some(Request::Apply(c)) => c,
            other => panic!("{:?} parsed to {:?}", line, other),
        }
    }

    #[test]
    fn test_tokenize_keeps_remainder() {
        assert_eq!(tokenize("  !s   1  2 3 "), vec!["!s", "1", "2 3"]);
        assert_eq!(tokenize("!x"), vec!["!x"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_toggles() {
        assert_eq!(command("!x"), Command::ToggleMode);
        assert_eq!(command("!p"), Command::TogglePause);
        assert_eq!(command("  !p  "), Command::TogglePause);
    }

    #[test]
    fn test_toggles_with_arguments_ignored() {
        assert_eq!(parse_line("!x now"), None);
        assert_eq!(parse_line("!p please"), None);
    }

    #[test]
    fn test_set_rule() {
        assert_eq!(command("!l B36S23"), Command::SetRule(RuleSpec::parse("B36S23")));
        assert_eq!(command("!l nonsense"), Command::SetRule(RuleSpec::conway()));
        assert_eq!(parse_line("!l"), None);
    }

    #[test]
    fn test_probabilities_clamped() {
        assert_eq!(command("!r 2.5"), Command::ResetWithDensity(Probability::ONE));
        assert_eq!(command("!b -1"), Command::BirthBurst(Probability::ZERO));
        assert_eq!(command("!d 0.25"), Command::DeathBurst(Probability::new(0.25)));
    }

    #[test]
    fn test_probability_parse_failure_is_zero() {
        assert_eq!(command("!b lots"), Command::BirthBurst(Probability::ZERO));
        assert_eq!(parse_line("!b"), None);
    }

    #[test]
    fn test_cells() {
        assert_eq!(command("!s 100 200"), Command::SetCell { x: 100, y: 200 });
        assert_eq!(command("!u -4 7"), Command::ClearCell { x: -4, y: 7 });
    }

    #[test]
    fn test_cell_parse_failures_default_to_zero() {
        assert_eq!(command("!s a 5"), Command::SetCell { x: 0, y: 5 });
        assert_eq!(command("!s 5"), Command::SetCell { x: 5, y: 0 });
        assert_eq!(command("!u 1 2 3"), Command::ClearCell { x: 1, y: 0 });
    }

    #[test]
    fn test_oversized_cells_saturate() {
        assert_eq!(
            command("!s 99999999999999999999 3"),
            Command::SetCell { x: i64::MAX, y: 3 }
        );
        assert_eq!(
            command("!u -99999999999999999999 99999999999999999999"),
            Command::ClearCell { x: i64::MIN, y: i64::MAX }
        );
        assert_eq!(command("!s 1.5 2"), Command::SetCell { x: 0, y: 2 });
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_line("!help"), Some(Request::Help));
        assert!(HELP_TEXT.contains("!l"));
    }

    #[test]
    fn test_unknown_lines_dropped() {
        assert_eq!(parse_line("hello chat"), None);
        assert_eq!(parse_line("!q 1"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("!X"), None);
    }
}
