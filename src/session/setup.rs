//! Building rules, strategies and runners from a `MatchConfig`.

use log::info;

use super::driver::{MatchRunner, MoveSource, SeriesSummary};
use crate::core::{GameKind, GameRng, MatchConfig, SeatConfig, Side, StrategyKind};
use crate::error::{Error, Result};
use crate::experience::FileStorage;
use crate::games::nim::NimRules;
use crate::games::othello::OthelloRules;
use crate::games::tictactoe::TicTacToeRules;
use crate::rules::RulesEngine;
use crate::search::{AlphaBetaConfig, GreedyConfig};
use crate::strategy::{
    ExactMinimax, HeuristicAlphaBeta, LearnedGreedy, NimClosedForm, NoStrategy, Strategy, StrategyFactory,
};

/// Everything a strategy needs from the configuration.
#[derive(Clone, Debug)]
pub struct StrategySettings {
    pub seat: SeatConfig,
    pub alpha_beta: AlphaBetaConfig,
    pub greedy: GreedyConfig,
}

impl StrategySettings {
    #[must_use]
    pub fn from_config(config: &MatchConfig, side: Side) -> Self {
        Self {
            seat: config.seat(side).clone(),
            alpha_beta: config.alpha_beta.clone(),
            greedy: config.greedy.clone(),
        }
    }
}

/// A game whose strategies can be built from configuration.
pub trait ConfiguredGame: RulesEngine {
    /// Build the strategy named in `settings`. `rng` is only used by
    /// randomized strategies.
    fn build_strategy(settings: &StrategySettings, rng: GameRng) -> Result<Box<dyn Strategy<Self>>>;
}

fn unsupported(kind: StrategyKind, game: &str) -> Error {
    Error::invalid_config(format!("strategy {kind:?} cannot play {game}"))
}

fn storage_for(seat: &SeatConfig) -> Option<Box<FileStorage>> {
    seat.experience_path.as_ref().map(|path| Box::new(FileStorage::new(path)))
}

impl ConfiguredGame for NimRules {
    fn build_strategy(settings: &StrategySettings, rng: GameRng) -> Result<Box<dyn Strategy<Self>>> {
        match settings.seat.strategy {
            StrategyKind::Human => Ok(Box::new(NoStrategy)),
            StrategyKind::NimClosedForm => Ok(Box::new(NimClosedForm::new(rng))),
            StrategyKind::ExactMinimax => Ok(Box::new(ExactMinimax::<NimRules>::new())),
            kind => Err(unsupported(kind, "nim")),
        }
    }
}

impl ConfiguredGame for TicTacToeRules {
    fn build_strategy(settings: &StrategySettings, rng: GameRng) -> Result<Box<dyn Strategy<Self>>> {
        match settings.seat.strategy {
            StrategyKind::Human => Ok(Box::new(NoStrategy)),
            StrategyKind::ExactMinimax => Ok(Box::new(ExactMinimax::<TicTacToeRules>::new())),
            StrategyKind::LearnedGreedy => {
                let greedy = match storage_for(&settings.seat) {
                    Some(storage) => LearnedGreedy::with_storage(settings.greedy.clone(), rng, storage)?,
                    None => LearnedGreedy::new(settings.greedy.clone(), rng),
                };
                Ok(Box::new(greedy))
            }
            kind => Err(unsupported(kind, "tictactoe")),
        }
    }
}

impl ConfiguredGame for OthelloRules {
    fn build_strategy(settings: &StrategySettings, _rng: GameRng) -> Result<Box<dyn Strategy<Self>>> {
        match settings.seat.strategy {
            StrategyKind::Human => Ok(Box::new(NoStrategy)),
            StrategyKind::HeuristicAlphaBeta => {
                let search = match storage_for(&settings.seat) {
                    Some(storage) => HeuristicAlphaBeta::with_storage(settings.alpha_beta.clone(), storage)?,
                    None => HeuristicAlphaBeta::new(settings.alpha_beta.clone()),
                };
                Ok(Box::new(search))
            }
            kind => Err(unsupported(kind, "othello")),
        }
    }
}

/// Factory for `side`'s strategy. Each build draws a new RNG stream forked
/// from the seat's own, so replacements never repeat earlier play.
pub fn strategy_factory<E: ConfiguredGame>(config: &MatchConfig, side: Side) -> StrategyFactory<E> {
    let settings = StrategySettings::from_config(config, side);
    let mut rng = GameRng::new(config.seed).for_context(&format!("seat-{}", side.index()));
    Box::new(move || E::build_strategy(&settings, rng.fork()))
}

/// Runner for `rules` with both seats and limits taken from `config`.
pub fn configured_runner<E: ConfiguredGame>(rules: E, config: &MatchConfig) -> Result<MatchRunner<E>> {
    let runner = MatchRunner::new(
        rules,
        strategy_factory(config, Side::Home),
        strategy_factory(config, Side::Away),
    )?;
    Ok(runner
        .with_games(config.games)
        .with_max_illegal_moves(config.max_illegal_moves)
        .with_max_plies(config.max_plies)
        .with_opening(config.opening.iter().cloned()))
}

/// Validate `config`, build its game and play the series.
///
/// `move_source` supplies moves for human seats.
pub fn run_configured(config: &MatchConfig, move_source: Option<Box<dyn MoveSource>>) -> Result<SeriesSummary> {
    config.validate()?;
    info!(
        "starting {} series: {:?} vs {:?}, {} games",
        config.game.name(),
        config.home.strategy,
        config.away.strategy,
        config.games
    );

    fn run<E: ConfiguredGame>(
        rules: E,
        config: &MatchConfig,
        move_source: Option<Box<dyn MoveSource>>,
    ) -> Result<SeriesSummary> {
        let mut runner = configured_runner(rules, config)?;
        if let Some(source) = move_source {
            runner = runner.with_move_source(source);
        }
        runner.run()
    }

    match &config.game {
        GameKind::Nim { piles } => run(NimRules::new(piles)?, config, move_source),
        GameKind::TicTacToe => run(TicTacToeRules::new(), config, move_source),
        GameKind::Othello { rows, cols } => run(OthelloRules::new(*rows, *cols)?, config, move_source),
    }
}
