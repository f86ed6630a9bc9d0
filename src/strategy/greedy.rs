//! Experience-driven Tic-Tac-Toe.

use log::debug;

use super::{attached, or_fallback, Attachment, Learning, Strategy};
use crate::core::{GameRng, MatchResult, Side};
use crate::error::{Error, Result};
use crate::experience::ExperienceStorage;
use crate::games::tictactoe::{TicTacToeAction, TicTacToePosition, TicTacToeRules};
use crate::rules::RulesEngine;
use crate::search::GreedyConfig;

/// One-ply lookahead scored by past results.
///
/// Each candidate move is scored by the experience record of the position it
/// leads to, plus a random bonus that shrinks as the board fills. The chosen
/// positions are replayed into the store once the result is known.
#[derive(Debug)]
pub struct LearnedGreedy {
    config: GreedyConfig,
    rng: GameRng,
    learning: Learning,
    attachment: Option<Attachment<TicTacToeRules>>,
}

impl LearnedGreedy {
    /// Strategy with an in-memory table that is never saved.
    #[must_use]
    pub fn new(config: GreedyConfig, rng: GameRng) -> Self {
        Self {
            config,
            rng,
            learning: Learning::in_memory(),
            attachment: None,
        }
    }

    /// Strategy whose table is loaded from `storage` now and saved at shutdown.
    pub fn with_storage(config: GreedyConfig, rng: GameRng, storage: Box<dyn ExperienceStorage>) -> Result<Self> {
        Ok(Self {
            config,
            rng,
            learning: Learning::open(storage)?,
            attachment: None,
        })
    }

    #[must_use]
    pub fn learning(&self) -> &Learning {
        &self.learning
    }

    fn compute(&mut self, position: &TicTacToePosition) -> Result<TicTacToeAction> {
        let Attachment { rules, side } = attached(&self.attachment)?.clone();
        let bound = self.config.bound(position.open_cells());

        let mut best: Option<(TicTacToeAction, String, f64)> = None;
        for action in rules.legal_actions(position, side) {
            let next = rules.apply(position, side, &action)?;
            let key = rules.position_key(&next);
            let value = self.learning.lookup(&key).score + self.rng.gen_unit() * bound;
            if best.as_ref().map_or(true, |(_, _, v)| value > *v) {
                best = Some((action, key, value));
            }
        }

        let (action, key, value) = best.ok_or(Error::NoLegalMoves)?;
        debug!("greedy: {} plays {} -> {} ({:.3})", side, action.0, key, value);
        self.learning.remember(key);
        Ok(action)
    }
}

impl Strategy<TicTacToeRules> for LearnedGreedy {
    fn name(&self) -> &'static str {
        "learned-greedy"
    }

    fn attach(&mut self, rules: &TicTacToeRules, side: Side) {
        self.attachment = Some(Attachment { rules: *rules, side });
    }

    fn choose_move(&mut self, position: &TicTacToePosition) -> Option<TicTacToeAction> {
        let computed = self.compute(position);
        Some(or_fallback::<TicTacToeRules>(self.name(), computed))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::InMemoryStorage;

    fn attached_greedy(balancer: f64, side: Side) -> LearnedGreedy {
        let mut greedy = LearnedGreedy::new(GreedyConfig::default().with_balancer(balancer), GameRng::new(3));
        greedy.attach(&TicTacToeRules::new(), side);
        greedy
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let mut greedy = attached_greedy(0.0, Side::Home);
        let position = TicTacToeRules::new().initial_position();
        assert_eq!(greedy.choose_move(&position), Some(TicTacToeAction(0)));
        assert_eq!(greedy.learning().history(), ["X--------"]);
    }

    #[test]
    fn test_prefers_higher_score() {
        let storage = InMemoryStorage::with_contents("----X----#3-0-0#0.9\n");
        let mut greedy = LearnedGreedy::with_storage(
            GreedyConfig::default().with_balancer(0.0),
            GameRng::new(3),
            Box::new(storage),
        )
        .unwrap();
        greedy.attach(&TicTacToeRules::new(), Side::Home);

        let position = TicTacToeRules::new().initial_position();
        assert_eq!(greedy.choose_move(&position), Some(TicTacToeAction(4)));
    }

    #[test]
    fn test_result_updates_history_and_shutdown_saves() {
        let storage = InMemoryStorage::new();
        let mut greedy =
            LearnedGreedy::with_storage(GreedyConfig::default(), GameRng::new(11), Box::new(storage.clone())).unwrap();
        greedy.attach(&TicTacToeRules::new(), Side::Away);

        let position = TicTacToePosition::from_picture("X--------", Some(Side::Away)).unwrap();
        greedy.choose_move(&position).unwrap();
        let key = greedy.learning().history()[0].clone();

        greedy.on_result(MatchResult::AwayWin);
        let record = greedy.learning().store().peek(&key).copied().unwrap();
        assert_eq!((record.wins, record.losses, record.ties), (1, 0, 0));
        assert!((record.score - 0.6).abs() < 1e-9);

        greedy.on_shutdown().unwrap();
        assert!(storage.contents().contains(&format!("{key}#1-0-0#")));
    }

    #[test]
    fn test_not_our_turn_falls_back() {
        let mut greedy = attached_greedy(0.25, Side::Away);
        let position = TicTacToeRules::new().initial_position();
        assert_eq!(greedy.choose_move(&position), Some(TicTacToeAction(0)));
        assert!(greedy.learning().history().is_empty());
    }
}
