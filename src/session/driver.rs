//! Offline match driver.
//!
//! Plays a series between two seats on the calling thread. Each game has a
//! referee copy that owns the real position and one client copy per seat.
//! Every ply follows the same loop:
//!
//! 1. The referee's state is sent to the client whose turn it is.
//! 2. That client's strategy (or the move source, for a human) picks a move.
//! 3. The move travels as a `@GAME:MOVE` line and the referee applies it.
//!
//! An optional opening script is played on the referee before the loop
//! starts, for whichever side is to move; the seats take over from there.
//!
//! When the game ends the result is posted to both strategies, and after the
//! last game both are shut down so they can save their experience.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use super::instance::{GameInstance, SharedGame};
use super::reporter::StatusReporter;
use crate::core::{MatchResult, MoveRecord, Side, Winner};
use crate::error::{Error, Result};
use crate::protocol::{GameMessage, Message};
use crate::rules::{RulesEngine, Scoreboard};
use crate::strategy::{Strategy, StrategyFactory};

/// Where moves for human seats come from.
///
/// Gets the serialized state and the side to move; returns a move in wire
/// notation, or `None` when it has nothing to offer.
pub trait MoveSource: Send {
    fn next_move(&mut self, state: &str, side: Side) -> Option<String>;
}

/// Plays a fixed list of moves in order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedMoves {
    moves: VecDeque<String>,
}

impl ScriptedMoves {
    pub fn new<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            moves: moves.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, _state: &str, _side: Side) -> Option<String> {
        self.moves.pop_front()
    }
}

/// How one game ended.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSummary {
    pub winner: Winner,
    pub history: Vec<MoveRecord>,
    pub final_state: String,
    pub score: Option<Scoreboard>,

    /// Side that forfeited, if any.
    pub forfeited: Option<Side>,
}

impl GameSummary {
    #[must_use]
    pub fn result(&self) -> MatchResult {
        self.winner.match_result()
    }

    #[must_use]
    pub fn plies(&self) -> usize {
        self.history.len()
    }
}

/// Results of a whole series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesSummary {
    pub games: Vec<GameSummary>,
}

impl SeriesSummary {
    #[must_use]
    pub fn wins(&self, side: Side) -> usize {
        self.games.iter().filter(|g| g.winner == Winner::side(side)).count()
    }

    /// Games without a winning side: ties and aborted games.
    #[must_use]
    pub fn ties(&self) -> usize {
        self.games.iter().filter(|g| g.result() == MatchResult::Tie).count()
    }
}

/// Runs a series of games between two seats.
pub struct MatchRunner<E: RulesEngine> {
    rules: E,
    factories: [StrategyFactory<E>; 2],
    strategies: [Option<Box<dyn Strategy<E>>>; 2],
    move_source: Option<Box<dyn MoveSource>>,
    opening: Vec<String>,
    games: u32,
    max_illegal_moves: u32,
    max_plies: u32,
    status_interval: Option<Duration>,
}

impl<E: RulesEngine> MatchRunner<E> {
    /// Runner for one game with strategies built by `home` and `away`.
    pub fn new(rules: E, mut home: StrategyFactory<E>, mut away: StrategyFactory<E>) -> Result<Self> {
        let strategies = [Some(home()?), Some(away()?)];
        Ok(Self {
            rules,
            factories: [home, away],
            strategies,
            move_source: None,
            opening: Vec::new(),
            games: 1,
            max_illegal_moves: 3,
            max_plies: 10_000,
            status_interval: None,
        })
    }

    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    pub fn with_max_illegal_moves(mut self, limit: u32) -> Self {
        self.max_illegal_moves = limit.max(1);
        self
    }

    pub fn with_max_plies(mut self, limit: u32) -> Self {
        self.max_plies = limit;
        self
    }

    /// Moves for seats whose strategy does not play on its own.
    pub fn with_move_source(mut self, source: Box<dyn MoveSource>) -> Self {
        self.move_source = Some(source);
        self
    }

    /// Moves played at the start of every game for whoever is to move.
    ///
    /// An opening move the rules reject fails the series.
    pub fn with_opening<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opening = moves.into_iter().map(Into::into).collect();
        self
    }

    /// Log the referee's state from a background thread while games run.
    pub fn with_status_interval(mut self, interval: Duration) -> Self {
        self.status_interval = Some(interval);
        self
    }

    /// Play every game, then shut both strategies down.
    ///
    /// Shutdown runs for both seats even if the first fails; the first
    /// error is returned.
    pub fn run(&mut self) -> Result<SeriesSummary> {
        let mut summary = SeriesSummary::default();
        for number in 1..=self.games {
            info!("{}: game {} of {}", self.rules.name(), number, self.games);
            summary.games.push(self.play_game()?);
        }
        info!(
            "{}: series over, home {} away {} ties {}",
            self.rules.name(),
            summary.wins(Side::Home),
            summary.wins(Side::Away),
            summary.ties()
        );

        let mut outcome = Ok(summary);
        for strategy in self.strategies.iter_mut().flatten() {
            if let Err(err) = strategy.on_shutdown() {
                warn!("{} failed to shut down: {}", strategy.name(), err);
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        outcome
    }

    /// Strategy for `side`, fresh from its factory if none is waiting.
    fn take_strategy(&mut self, side: Side) -> Result<Box<dyn Strategy<E>>> {
        match self.strategies[side.index()].take() {
            Some(strategy) => Ok(strategy),
            None => (self.factories[side.index()])(),
        }
    }

    fn play_game(&mut self) -> Result<GameSummary> {
        let referee = GameInstance::authoritative(self.rules.clone()).shared();
        self.play_opening(&referee)?;
        let mut clients = [
            GameInstance::client(self.rules.clone(), Side::Home, self.take_strategy(Side::Home)?),
            GameInstance::client(self.rules.clone(), Side::Away, self.take_strategy(Side::Away)?),
        ];
        let reporter = self
            .status_interval
            .map(|interval| StatusReporter::spawn(Arc::clone(&referee), interval));

        let mut illegal = [0_u32; 2];
        let mut forfeited = None;
        loop {
            let (state, turn, plies) = {
                let game = referee.lock();
                if game.is_done() {
                    break;
                }
                (game.current_state(), game.turn(), game.history().len())
            };
            let (Some(state), Some(side)) = (state, turn) else {
                warn!("{}: nobody to move, aborting", self.rules.name());
                referee.lock().abort();
                break;
            };
            if plies >= self.max_plies as usize {
                warn!("{}: no result after {} plies, aborting", self.rules.name(), plies);
                referee.lock().abort();
                break;
            }

            let client = &mut clients[side.index()];
            client.apply_remote_state(&state)?;
            let notation = if client.is_automated() {
                client.request_move()
            } else {
                self.move_source.as_mut().and_then(|source| source.next_move(&state, side))
            };

            let outcome = match notation {
                Some(notation) => submit(&referee, side, &Message::game_move(notation).to_string()),
                None => Err(Error::NoLegalMoves),
            };
            match outcome {
                Ok(()) => illegal[side.index()] = 0,
                Err(err) => {
                    illegal[side.index()] += 1;
                    warn!(
                        "{}: rejected move from {} ({} of {}): {}",
                        self.rules.name(),
                        side,
                        illegal[side.index()],
                        self.max_illegal_moves,
                        err
                    );
                    if illegal[side.index()] >= self.max_illegal_moves {
                        referee.lock().forfeit(side);
                        forfeited = Some(side);
                    }
                }
            }
        }
        if let Some(reporter) = reporter {
            reporter.stop();
        }

        let game = referee.lock();
        let result = game.winner().match_result();
        info!("{}: game over, {:?} ({:?})", self.rules.name(), game.winner(), result);

        for client in &mut clients {
            let Some(seat) = client.seat() else { continue };
            if forfeited == Some(seat) {
                // A forfeiting strategy is discarded; its replacement comes from the factory.
                info!("{}: replacing {}'s strategy", self.rules.name(), seat);
                continue;
            }
            client.notify_result(result);
            self.strategies[seat.index()] = client.take_strategy();
        }

        Ok(GameSummary {
            winner: game.winner(),
            history: game.history().to_vec(),
            final_state: game.current_state().unwrap_or_default(),
            score: game.score(),
            forfeited,
        })
    }

    fn play_opening(&self, referee: &SharedGame<E>) -> Result<()> {
        let mut game = referee.lock();
        for notation in &self.opening {
            let Some(side) = game.turn().filter(|_| !game.is_done()) else {
                warn!("{}: game over before opening move {}", self.rules.name(), notation);
                break;
            };
            game.process_move(side, notation)?;
        }
        if !self.opening.is_empty() {
            info!("{}: opening played, {} plies", self.rules.name(), game.history().len());
        }
        Ok(())
    }
}

/// Deliver one protocol line from `side` to the referee.
fn submit<E: RulesEngine>(referee: &SharedGame<E>, side: Side, line: &str) -> Result<()> {
    match line.parse::<Message>()? {
        Message::Game(GameMessage::Move(notation)) => referee.lock().process_move(side, &notation),
        _ => Err(Error::Protocol(line.to_string())),
    }
}
