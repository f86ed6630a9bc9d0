//! Heuristic alpha-beta Othello.

use log::debug;

use super::{attached, or_fallback, Attachment, Learning, Strategy};
use crate::core::{MatchResult, Side};
use crate::error::{Error, Result};
use crate::experience::ExperienceStorage;
use crate::games::othello::{OthelloAction, OthelloPosition, OthelloRules};
use crate::rules::RulesEngine;
use crate::search::{alpha_beta, AlphaBetaConfig, OthelloHeuristic};

/// Depth-limited alpha-beta with `OthelloHeuristic` at the cutoff.
///
/// The depth follows the board size through `AlphaBetaConfig::depth_for`.
/// Every move it plays is logged to its experience table as
/// `side#position#move` and scored once the game ends.
#[derive(Debug)]
pub struct HeuristicAlphaBeta {
    config: AlphaBetaConfig,
    learning: Learning,
    attachment: Option<Attachment<OthelloRules>>,
}

impl Default for HeuristicAlphaBeta {
    fn default() -> Self {
        Self::new(AlphaBetaConfig::default())
    }
}

impl HeuristicAlphaBeta {
    #[must_use]
    pub fn new(config: AlphaBetaConfig) -> Self {
        Self {
            config,
            learning: Learning::in_memory(),
            attachment: None,
        }
    }

    pub fn with_storage(config: AlphaBetaConfig, storage: Box<dyn ExperienceStorage>) -> Result<Self> {
        Ok(Self {
            config,
            learning: Learning::open(storage)?,
            attachment: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    #[must_use]
    pub fn learning(&self) -> &Learning {
        &self.learning
    }

    fn compute(&mut self, position: &OthelloPosition) -> Result<OthelloAction> {
        let Attachment { rules, side } = *attached(&self.attachment)?;
        let depth = self.config.depth_for(position.board.rows(), position.board.cols());
        let outcome =
            alpha_beta(&rules, position, side, Some(depth), &OthelloHeuristic).ok_or(Error::NoLegalMoves)?;

        debug!(
            "alpha-beta: {} plays {} (value {}, depth {}, {} nodes)",
            side, outcome.action, outcome.value, depth, outcome.nodes
        );
        self.learning.remember(format!(
            "{}#{}#{}",
            side.index(),
            rules.position_key(position),
            outcome.action
        ));
        Ok(outcome.action)
    }
}

impl Strategy<OthelloRules> for HeuristicAlphaBeta {
    fn name(&self) -> &'static str {
        "heuristic-alpha-beta"
    }

    fn attach(&mut self, rules: &OthelloRules, side: Side) {
        self.attachment = Some(Attachment { rules: *rules, side });
    }

    fn choose_move(&mut self, position: &OthelloPosition) -> Option<OthelloAction> {
        let computed = self.compute(position);
        Some(or_fallback::<OthelloRules>(self.name(), computed))
    }

    fn on_result(&mut self, result: MatchResult) {
        if let Some(attachment) = &self.attachment {
            self.learning.settle(result.outcome_for(attachment.side));
        }
    }

    fn on_shutdown(&mut self) -> Result<()> {
        self.learning.persist()
    }
}
