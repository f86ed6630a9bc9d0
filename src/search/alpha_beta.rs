//! Depth-limited alpha-beta.

use log::debug;

use super::{step, Evaluator, SearchOutcome, Step};
use crate::core::Side;
use crate::rules::RulesEngine;

struct AlphaBeta<'a, E: RulesEngine, V> {
    rules: &'a E,
    evaluator: &'a V,
    perspective: Side,
    nodes: u64,
}

impl<E: RulesEngine, V: Evaluator<E>> AlphaBeta<'_, E, V> {
    fn leaf(&self, position: &E::Position) -> i32 {
        self.evaluator.evaluate(self.rules, position, self.perspective)
    }

    /// Value of `position` with `remaining` plies left (`None` is unlimited).
    fn value(&mut self, position: &E::Position, mut alpha: i32, mut beta: i32, remaining: Option<u32>) -> i32 {
        self.nodes += 1;
        if remaining == Some(0) {
            return self.leaf(position);
        }
        let next = remaining.map(|d| d - 1);

        let (side, actions) = match step(self.rules, position) {
            Step::Leaf => return self.leaf(position),
            Step::Pass { position } => return self.value(&position, alpha, beta, next),
            Step::Choose { side, actions } => (side, actions),
        };

        if side == self.perspective {
            let mut best = i32::MIN;
            for action in &actions {
                let Ok(child) = self.rules.apply(position, side, action) else {
                    continue;
                };
                best = best.max(self.value(&child, alpha, beta, next));
                if best >= beta {
                    return best;
                }
                alpha = alpha.max(best);
            }
            best
        } else {
            let mut best = i32::MAX;
            for action in &actions {
                let Ok(child) = self.rules.apply(position, side, action) else {
                    continue;
                };
                best = best.min(self.value(&child, alpha, beta, next));
                if best <= alpha {
                    return best;
                }
                beta = beta.min(best);
            }
            best
        }
    }
}

/// Best move for `perspective` by alpha-beta search.
///
/// `depth` counts plies including the root move, so a depth of 1 scores each
/// legal move's resulting position directly. `None` searches to the end.
/// Returns `None` when it is not `perspective`'s turn or it has no legal
/// action. Ties go to the first action in `legal_actions` order.
pub fn alpha_beta<E, V>(
    rules: &E,
    position: &E::Position,
    perspective: Side,
    depth: Option<u32>,
    evaluator: &V,
) -> Option<SearchOutcome<E::Action>>
where
    E: RulesEngine,
    V: Evaluator<E>,
{
    if rules.to_move(position) != Some(perspective) {
        return None;
    }
    let mut search = AlphaBeta {
        rules,
        evaluator,
        perspective,
        nodes: 1,
    };
    let remaining = depth.map(|d| d.saturating_sub(1));

    let mut alpha = i32::MIN;
    let mut best: Option<(E::Action, i32)> = None;
    for action in rules.legal_actions(position, perspective) {
        let Ok(child) = rules.apply(position, perspective, &action) else {
            continue;
        };
        let value = search.value(&child, alpha, i32::MAX, remaining);
        if best.as_ref().map_or(true, |(_, v)| value > *v) {
            alpha = alpha.max(value);
            best = Some((action, value));
        }
    }

    let (action, value) = best?;
    debug!(
        "alpha-beta chose {:?} (value {}, depth {:?}, {} nodes)",
        action, value, depth, search.nodes
    );
    Some(SearchOutcome {
        action,
        value,
        nodes: search.nodes,
    })
}
