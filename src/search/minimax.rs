//! Exhaustive minimax.

use log::debug;

use super::{step, Evaluator, SearchOutcome, Step};
use crate::core::Side;
use crate::rules::RulesEngine;

struct Minimax<'a, E: RulesEngine, V> {
    rules: &'a E,
    evaluator: &'a V,
    perspective: Side,
    nodes: u64,
}

impl<E: RulesEngine, V: Evaluator<E>> Minimax<'_, E, V> {
    fn value(&mut self, position: &E::Position) -> i32 {
        self.nodes += 1;
        match step(self.rules, position) {
            Step::Leaf => self.evaluator.evaluate(self.rules, position, self.perspective),
            Step::Pass { position } => self.value(&position),
            Step::Choose { side, actions } => {
                let children = actions
                    .iter()
                    .filter_map(|action| self.rules.apply(position, side, action).ok())
                    .collect::<Vec<_>>();
                let maximizing = side == self.perspective;
                let values = children.iter().map(|child| self.value(child));
                let best = if maximizing {
                    values.max()
                } else {
                    values.min()
                };
                best.unwrap_or_else(|| self.evaluator.evaluate(self.rules, position, self.perspective))
            }
        }
    }
}

/// Best move for `perspective` by full-depth minimax.
///
/// Returns `None` when it is not `perspective`'s turn or it has no legal
/// action. Ties go to the first action in `legal_actions` order.
pub fn minimax<E, V>(rules: &E, position: &E::Position, perspective: Side, evaluator: &V) -> Option<SearchOutcome<E::Action>>
where
    E: RulesEngine,
    V: Evaluator<E>,
{
    if rules.to_move(position) != Some(perspective) {
        return None;
    }
    let mut search = Minimax {
        rules,
        evaluator,
        perspective,
        nodes: 1,
    };

    let mut best: Option<(E::Action, i32)> = None;
    for action in rules.legal_actions(position, perspective) {
        let Ok(child) = rules.apply(position, perspective, &action) else {
            continue;
        };
        let value = search.value(&child);
        if best.as_ref().map_or(true, |(_, v)| value > *v) {
            best = Some((action, value));
        }
    }

    let (action, value) = best?;
    debug!(
        "minimax chose {:?} (value {}, {} nodes)",
        action, value, search.nodes
    );
    Some(SearchOutcome {
        action,
        value,
        nodes: search.nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nim::{NimAction, NimPosition, NimRules};
    use crate::games::tictactoe::{TicTacToeAction, TicTacToePosition, TicTacToeRules};
    use crate::search::TerminalUtility;

    #[test]
    fn test_takes_immediate_win() {
        let rules = TicTacToeRules::new();
        let position = TicTacToePosition::from_picture("XX-OO----", Some(Side::Home)).unwrap();
        let outcome = minimax(&rules, &position, Side::Home, &TerminalUtility).unwrap();

        assert_eq!(outcome.action, TicTacToeAction(2));
        assert_eq!(outcome.value, 1);
    }

    #[test]
    fn test_blocks_threat() {
        let rules = TicTacToeRules::new();
        // O threatens 0-4-8; X must take 8.
        let position = TicTacToePosition::from_picture("OX--O-X--", Some(Side::Home)).unwrap();
        let outcome = minimax(&rules, &position, Side::Home, &TerminalUtility).unwrap();

        assert_eq!(outcome.action, TicTacToeAction(8));
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let rules = TicTacToeRules::new();
        let outcome = minimax(&rules, &rules.initial_position(), Side::Home, &TerminalUtility).unwrap();
        assert_eq!(outcome.value, 0);
        assert!(outcome.nodes > 500_000);
    }

    #[test]
    fn test_not_our_turn() {
        let rules = TicTacToeRules::new();
        assert!(minimax(&rules, &rules.initial_position(), Side::Away, &TerminalUtility).is_none());
    }

    #[test]
    fn test_misere_nim_endgame() {
        // Two piles of one: whoever moves takes one, the other takes the last and loses.
        let rules = NimRules::default();
        let position = NimPosition::new(&[1, 1, 0], Some(Side::Home));
        let outcome = minimax(&rules, &position, Side::Home, &TerminalUtility).unwrap();
        assert_eq!(outcome.value, 1);

        // One pile of three: take two, leave the last object to the opponent.
        let position = NimPosition::new(&[3, 0, 0], Some(Side::Home));
        let outcome = minimax(&rules, &position, Side::Home, &TerminalUtility).unwrap();
        assert_eq!(outcome.action, NimAction::new(0, 2));
        assert_eq!(outcome.value, 1);
    }
}
