//! Match configuration.
//!
//! A `MatchConfig` names the game, who sits in each seat and how the series
//! is run. It is plain serde data so it can be loaded from JSON:
//!
//! ```json
//! {
//!   "game": { "kind": "othello", "rows": 6, "cols": 6 },
//!   "home": { "strategy": "heuristic_alpha_beta", "experience_path": "home.txt" },
//!   "away": { "strategy": "human" },
//!   "games": 3
//! }
//! ```
//!
//! Missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::Side;
use crate::error::{Error, Result};
use crate::games::othello::{MAX_DIMENSION, MIN_DIMENSION};
use crate::search::{AlphaBetaConfig, GreedyConfig};

/// Which game to play, with its size parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameKind {
    Nim {
        #[serde(default = "default_piles")]
        piles: Vec<u32>,
    },
    TicTacToe,
    Othello {
        #[serde(default = "default_othello_side")]
        rows: usize,
        #[serde(default = "default_othello_side")]
        cols: usize,
    },
}

fn default_piles() -> Vec<u32> {
    crate::games::nim::DEFAULT_PILES.to_vec()
}

fn default_othello_side() -> usize {
    8
}

impl GameKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameKind::Nim { .. } => "nim",
            GameKind::TicTacToe => "tictactoe",
            GameKind::Othello { .. } => "othello",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            GameKind::Nim { piles } if piles.is_empty() => Err(Error::invalid_config("nim needs at least one pile")),
            GameKind::Othello { rows, cols } => {
                for (name, value) in [("rows", *rows), ("cols", *cols)] {
                    if value % 2 != 0 || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                        return Err(Error::invalid_config(format!(
                            "othello {name} must be even and between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
                        )));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Who decides the moves for a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Human,
    NimClosedForm,
    LearnedGreedy,
    ExactMinimax,
    HeuristicAlphaBeta,
}

impl StrategyKind {
    /// True if this strategy can play `game`.
    #[must_use]
    pub fn supports(self, game: &GameKind) -> bool {
        match self {
            StrategyKind::Human => true,
            // Full-depth search is out of reach on Othello boards.
            StrategyKind::ExactMinimax => !matches!(game, GameKind::Othello { .. }),
            StrategyKind::NimClosedForm => matches!(game, GameKind::Nim { .. }),
            StrategyKind::LearnedGreedy => matches!(game, GameKind::TicTacToe),
            StrategyKind::HeuristicAlphaBeta => matches!(game, GameKind::Othello { .. }),
        }
    }

    /// True for strategies that keep an experience table.
    #[must_use]
    pub fn learns(self) -> bool {
        matches!(self, StrategyKind::LearnedGreedy | StrategyKind::HeuristicAlphaBeta)
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub strategy: StrategyKind,

    /// Experience file for learning strategies. Without one the table is
    /// kept in memory and discarded after the series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_path: Option<PathBuf>,
}

impl SeatConfig {
    #[must_use]
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            experience_path: None,
        }
    }

    pub fn with_experience_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.experience_path = Some(path.into());
        self
    }
}

/// A series of games between two seats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub game: GameKind,
    pub home: SeatConfig,
    pub away: SeatConfig,

    /// Games in the series.
    pub games: u32,

    /// Seed for every randomized strategy. Each seat gets its own stream.
    pub seed: u64,

    /// Consecutive illegal moves that forfeit the game.
    pub max_illegal_moves: u32,

    /// Plies after which a game is aborted without a winner.
    pub max_plies: u32,

    /// Moves in wire notation played for whoever is to move at the start of
    /// every game, before the seats take over.
    pub opening: Vec<String>,

    pub alpha_beta: AlphaBetaConfig,
    pub greedy: GreedyConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            game: GameKind::TicTacToe,
            home: SeatConfig::new(StrategyKind::LearnedGreedy),
            away: SeatConfig::new(StrategyKind::ExactMinimax),
            games: 1,
            seed: 42,
            max_illegal_moves: 3,
            max_plies: 10_000,
            opening: Vec::new(),
            alpha_beta: AlphaBetaConfig::default(),
            greedy: GreedyConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Default seats for `game`: the game's own AI against itself.
    #[must_use]
    pub fn for_game(game: GameKind) -> Self {
        let strategy = match game {
            GameKind::Nim { .. } => StrategyKind::NimClosedForm,
            GameKind::TicTacToe => StrategyKind::ExactMinimax,
            GameKind::Othello { .. } => StrategyKind::HeuristicAlphaBeta,
        };
        Self {
            game,
            home: SeatConfig::new(strategy),
            away: SeatConfig::new(strategy),
            ..Self::default()
        }
    }

    /// Decode and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, decode and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("read config {}", path.display()), e))?;
        Self::from_json(&text)
    }

    #[must_use]
    pub fn seat(&self, side: Side) -> &SeatConfig {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn with_seat(mut self, side: Side, seat: SeatConfig) -> Self {
        match side {
            Side::Home => self.home = seat,
            Side::Away => self.away = seat,
        }
        self
    }

    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_illegal_moves(mut self, limit: u32) -> Self {
        self.max_illegal_moves = limit;
        self
    }

    pub fn with_max_plies(mut self, limit: u32) -> Self {
        self.max_plies = limit;
        self
    }

    pub fn with_opening<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opening = moves.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_alpha_beta(mut self, config: AlphaBetaConfig) -> Self {
        self.alpha_beta = config;
        self
    }

    pub fn with_greedy(mut self, config: GreedyConfig) -> Self {
        self.greedy = config;
        self
    }

    /// Check the game parameters, the limits and that each seat can play the game.
    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        if self.games == 0 {
            return Err(Error::invalid_config("a series needs at least one game"));
        }
        if self.max_illegal_moves == 0 {
            return Err(Error::invalid_config("max_illegal_moves must be at least 1"));
        }
        if self.max_plies == 0 {
            return Err(Error::invalid_config("max_plies must be at least 1"));
        }
        for side in Side::ALL {
            let seat = self.seat(side);
            if !seat.strategy.supports(&self.game) {
                return Err(Error::invalid_config(format!(
                    "{side} strategy {:?} cannot play {}",
                    seat.strategy,
                    self.game.name()
                )));
            }
            if seat.experience_path.is_some() && !seat.strategy.learns() {
                return Err(Error::invalid_config(format!(
                    "{side} strategy {:?} keeps no experience",
                    seat.strategy
                )));
            }
        }
        self.alpha_beta.validate()?;
        self.greedy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.game, GameKind::TicTacToe);
        assert_eq!(config.games, 1);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config = MatchConfig::from_json(
            r#"{
                "game": { "kind": "othello", "rows": 6, "cols": 4 },
                "home": { "strategy": "heuristic_alpha_beta", "experience_path": "home.txt" },
                "away": { "strategy": "heuristic_alpha_beta" },
                "games": 2
            }"#,
        )
        .unwrap();

        assert_eq!(config.game, GameKind::Othello { rows: 6, cols: 4 });
        assert_eq!(config.home.experience_path, Some(PathBuf::from("home.txt")));
        assert_eq!(config.away.experience_path, None);
        assert_eq!(config.games, 2);
        assert_eq!(config.max_illegal_moves, 3);
        assert_eq!(config.alpha_beta, AlphaBetaConfig::default());
    }

    #[test]
    fn test_nim_piles_default() {
        let config = MatchConfig::from_json(
            r#"{ "game": { "kind": "nim" },
                 "home": { "strategy": "nim_closed_form" },
                 "away": { "strategy": "human" } }"#,
        )
        .unwrap();
        assert_eq!(config.game, GameKind::Nim { piles: vec![3, 5, 7] });
    }

    #[test]
    fn test_rejects_mismatched_strategy() {
        let config = MatchConfig::for_game(GameKind::TicTacToe)
            .with_seat(Side::Away, SeatConfig::new(StrategyKind::HeuristicAlphaBeta));
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration { .. })));

        let config = MatchConfig::for_game(GameKind::TicTacToe)
            .with_seat(Side::Home, SeatConfig::new(StrategyKind::ExactMinimax).with_experience_path("x.txt"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_limits_and_sizes() {
        assert!(MatchConfig::default().with_games(0).validate().is_err());
        assert!(MatchConfig::default().with_max_plies(0).validate().is_err());
        assert!(MatchConfig::for_game(GameKind::Othello { rows: 5, cols: 8 }).validate().is_err());
        assert!(MatchConfig::for_game(GameKind::Othello { rows: 28, cols: 8 }).validate().is_err());
        assert!(MatchConfig::for_game(GameKind::Nim { piles: vec![] }).validate().is_err());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(MatchConfig::from_json("{ nope"), Err(Error::Config(_))));
        assert!(matches!(
            MatchConfig::from_json(r#"{ "game": { "kind": "chess" } }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = MatchConfig::for_game(GameKind::Nim { piles: vec![1, 2] }).with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        std::fs::write(&path, r#"{ "games": 4 }"#).unwrap();
        assert_eq!(MatchConfig::load(&path).unwrap().games, 4);

        let missing = MatchConfig::load(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }
}
