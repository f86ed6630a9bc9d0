//! Line protocol messages.
//!
//! One message per line, fields separated by `:`. Only the shapes are handled
//! here; reading and writing lines is up to the transport.
//!
//! | Line | Meaning |
//! |---|---|
//! | `@ERROR:<text>` | Error from the peer |
//! | `@MESSAGE:<text>` | Free text |
//! | `@PING` / `@PONG` | Keep-alive |
//! | `@GAME:START:<H\|A>:<opponent>` | New game, our seat and the opponent's name |
//! | `@GAME:STATE:<state>` | Serialized position |
//! | `@GAME:MOVE:<move>` | A move in wire notation |
//! | `@GAME:ERROR:<text>` | Error about the current game |
//! | `@GAME:MESSAGE:<text>` | Free text about the current game |
//! | `@GAME:RESULT:<H\|A\|T>` | Game over |
//! | `@GAME:FORFEIT:<H\|A\|T>` | Game forfeited |
//!
//! Top-level commands are matched case-insensitively. The last field keeps
//! any further `:` characters.

use std::fmt;
use std::str::FromStr;

use crate::core::{MatchResult, Side};
use crate::error::{Error, Result};

/// A game subcommand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameMessage {
    Start { side: Side, opponent: String },
    State(String),
    Move(String),
    Error(String),
    Message(String),
    Result(MatchResult),
    Forfeit(MatchResult),
}

/// One protocol line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Error(String),
    Text(String),
    Ping,
    Pong,
    Game(GameMessage),
}

impl Message {
    /// Shorthand for `@GAME:MOVE:<move>`.
    #[must_use]
    pub fn game_move(notation: impl Into<String>) -> Self {
        Message::Game(GameMessage::Move(notation.into()))
    }

    /// Shorthand for `@GAME:STATE:<state>`.
    #[must_use]
    pub fn game_state(state: impl Into<String>) -> Self {
        Message::Game(GameMessage::State(state.into()))
    }
}

fn protocol_error(line: &str) -> Error {
    Error::Protocol(line.to_string())
}

fn parse_result(line: &str, field: Option<&str>) -> Result<MatchResult> {
    field
        .and_then(|f| f.trim().chars().next())
        .and_then(MatchResult::from_char)
        .ok_or_else(|| protocol_error(line))
}

fn parse_seat(line: &str, field: &str) -> Result<Side> {
    match field.trim().chars().next() {
        Some('H' | 'h') => Ok(Side::Home),
        Some('A' | 'a') => Ok(Side::Away),
        _ => Err(protocol_error(line)),
    }
}

fn parse_game(line: &str, rest: Option<&str>) -> Result<GameMessage> {
    let rest = rest.ok_or_else(|| protocol_error(line))?;
    let (command, payload) = match rest.split_once(':') {
        Some((command, payload)) => (command, Some(payload)),
        None => (rest, None),
    };
    let text = |payload: Option<&str>| payload.map(str::to_string).ok_or_else(|| protocol_error(line));

    match command.to_ascii_uppercase().as_str() {
        "START" => {
            let (seat, opponent) = payload
                .and_then(|p| p.split_once(':'))
                .ok_or_else(|| protocol_error(line))?;
            Ok(GameMessage::Start {
                side: parse_seat(line, seat)?,
                opponent: opponent.to_string(),
            })
        }
        "STATE" => text(payload).map(GameMessage::State),
        "MOVE" => text(payload).map(GameMessage::Move),
        "ERROR" => text(payload).map(GameMessage::Error),
        "MESSAGE" => text(payload).map(GameMessage::Message),
        "RESULT" => parse_result(line, payload).map(GameMessage::Result),
        "FORFEIT" => parse_result(line, payload).map(GameMessage::Forfeit),
        _ => Err(protocol_error(line)),
    }
}

impl FromStr for Message {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let (command, rest) = match trimmed.split_once(':') {
            Some((command, rest)) => (command, Some(rest)),
            None => (trimmed, None),
        };

        match command.trim().to_ascii_uppercase().as_str() {
            "@ERROR" => rest.map(|r| Message::Error(r.to_string())).ok_or_else(|| protocol_error(line)),
            "@MESSAGE" => rest.map(|r| Message::Text(r.to_string())).ok_or_else(|| protocol_error(line)),
            "@PING" => Ok(Message::Ping),
            "@PONG" => Ok(Message::Pong),
            "@GAME" => parse_game(line, rest).map(Message::Game),
            _ => Err(protocol_error(line)),
        }
    }
}

impl fmt::Display for GameMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMessage::Start { side, opponent } => {
                let seat = match side {
                    Side::Home => 'H',
                    Side::Away => 'A',
                };
                write!(f, "START:{seat}:{opponent}")
            }
            GameMessage::State(state) => write!(f, "STATE:{state}"),
            GameMessage::Move(notation) => write!(f, "MOVE:{notation}"),
            GameMessage::Error(text) => write!(f, "ERROR:{text}"),
            GameMessage::Message(text) => write!(f, "MESSAGE:{text}"),
            GameMessage::Result(result) => write!(f, "RESULT:{}", result.as_char()),
            GameMessage::Forfeit(result) => write!(f, "FORFEIT:{}", result.as_char()),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Error(text) => write!(f, "@ERROR:{text}"),
            Message::Text(text) => write!(f, "@MESSAGE:{text}"),
            Message::Ping => f.write_str("@PING"),
            Message::Pong => f.write_str("@PONG"),
            Message::Game(game) => write!(f, "@GAME:{game}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Message {
        line.parse().unwrap()
    }

    #[test]
    fn test_parse_game_messages() {
        assert_eq!(
            parse("@GAME:START:A:deep-blue"),
            Message::Game(GameMessage::Start {
                side: Side::Away,
                opponent: "deep-blue".to_string()
            })
        );
        assert_eq!(parse("@GAME:STATE:0,3,5,7"), Message::game_state("0,3,5,7"));
        assert_eq!(parse("@GAME:MOVE:2d"), Message::game_move("2d"));
        assert_eq!(parse("@GAME:RESULT:T"), Message::Game(GameMessage::Result(MatchResult::Tie)));
        assert_eq!(
            parse("@GAME:FORFEIT:H\r\n"),
            Message::Game(GameMessage::Forfeit(MatchResult::HomeWin))
        );
    }

    #[test]
    fn test_parse_top_level() {
        assert_eq!(parse("@ping"), Message::Ping);
        assert_eq!(parse("@PONG"), Message::Pong);
        assert_eq!(parse("@MESSAGE:round 2: go"), Message::Text("round 2: go".to_string()));
        assert_eq!(parse("@ERROR:bad"), Message::Error("bad".to_string()));
    }

    #[test]
    fn test_state_keeps_spaces() {
        let Message::Game(GameMessage::State(state)) = parse("@GAME:STATE:1, ,X, ,O, , , , , ") else {
            panic!("expected a state message");
        };
        assert_eq!(state, "1, ,X, ,O, , , , , ");
    }

    #[test]
    fn test_rejects_malformed() {
        for line in ["", "hello", "@GAME", "@GAME:DANCE:1", "@GAME:RESULT:Q", "@GAME:START:H", "@GAME:MOVE"] {
            assert!(matches!(line.parse::<Message>(), Err(Error::Protocol(_))), "{line}");
        }
    }

    #[test]
    fn test_display_matches_wire_form() {
        for line in [
            "@ERROR:oops",
            "@MESSAGE:hi",
            "@PING",
            "@PONG",
            "@GAME:START:H:bot",
            "@GAME:STATE:-1,4,4, , ",
            "@GAME:MOVE:1,3",
            "@GAME:ERROR:illegal",
            "@GAME:MESSAGE:your move",
            "@GAME:RESULT:A",
            "@GAME:FORFEIT:T",
        ] {
            assert_eq!(parse(line).to_string(), line);
        }
    }
}
