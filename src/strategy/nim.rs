//! Closed-form Nim play.

use log::debug;

use super::{attached, or_fallback, Attachment, Strategy};
use crate::core::{GameRng, Side};
use crate::error::{Error, Result};
use crate::games::nim::{NimAction, NimPosition, NimRules};
use crate::rules::RulesEngine;

/// Move to nim-sum 0 when possible, otherwise a random legal move.
///
/// With nim-sum `s != 0`, the first pile `p` with `p ^ s < p` is reduced to
/// `p ^ s`. With `s == 0` no move wins by force, so a random non-empty pile
/// loses a random positive count. `None` only when every pile is empty.
pub fn closed_form_move(piles: &[u32], rng: &mut GameRng) -> Option<NimAction> {
    let sum = piles.iter().fold(0, |acc, &p| acc ^ p);
    if sum != 0 {
        return piles
            .iter()
            .enumerate()
            .find(|&(_, &p)| p ^ sum < p)
            .map(|(pile, &p)| NimAction::new(pile, p - (p ^ sum)));
    }

    let non_empty: Vec<usize> = (0..piles.len()).filter(|&i| piles[i] > 0).collect();
    let &pile = rng.choose(&non_empty)?;
    let count = rng.gen_inclusive_u32(1, piles[pile]);
    Some(NimAction::new(pile, count))
}

/// Nim strategy built on `closed_form_move`.
#[derive(Debug)]
pub struct NimClosedForm {
    rng: GameRng,
    attachment: Option<Attachment<NimRules>>,
}

impl NimClosedForm {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng, attachment: None }
    }

    fn compute(&mut self, position: &NimPosition) -> Result<NimAction> {
        let side = attached(&self.attachment)?.side;
        if position.turn != Some(side) {
            return Err(Error::NoLegalMoves);
        }
        closed_form_move(&position.piles, &mut self.rng).ok_or(Error::NoLegalMoves)
    }
}

impl Strategy<NimRules> for NimClosedForm {
    fn name(&self) -> &'static str {
        "nim-closed-form"
    }

    fn attach(&mut self, rules: &NimRules, side: Side) {
        self.attachment = Some(Attachment {
            rules: rules.clone(),
            side,
        });
    }

    fn choose_move(&mut self, position: &NimPosition) -> Option<NimAction> {
        let computed = self.compute(position);
        let action = or_fallback::<NimRules>(self.name(), computed);
        if let Some(attachment) = &self.attachment {
            debug!("nim: {} plays {}", attachment.side, attachment.rules.format_action(&action));
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_to_zero_sum() {
        let mut rng = GameRng::new(1);
        // 3 ^ 5 ^ 7 = 1; pile 0 (3) becomes 2.
        let action = closed_form_move(&[3, 5, 7], &mut rng).unwrap();
        assert_eq!(action, NimAction::new(0, 1));

        let action = closed_form_move(&[0, 0, 4], &mut rng).unwrap();
        assert_eq!(action, NimAction::new(2, 4));
    }

    #[test]
    fn test_zero_sum_plays_random_legal_move() {
        let mut rng = GameRng::new(9);
        for _ in 0..50 {
            let action = closed_form_move(&[0, 5, 5], &mut rng).unwrap();
            assert!(action.pile == 1 || action.pile == 2);
            assert!((1..=5).contains(&action.count));
        }
        assert!(closed_form_move(&[0, 0], &mut rng).is_none());
    }

    #[test]
    fn test_unattached_falls_back() {
        let rules = NimRules::default();
        let mut strategy = NimClosedForm::new(GameRng::new(0));
        let action = strategy.choose_move(&rules.initial_position());
        assert_eq!(action, Some(NimRules::fallback_action()));
    }

    #[test]
    fn test_attached_plays_legal_move() {
        let rules = NimRules::default();
        let mut strategy = NimClosedForm::new(GameRng::new(0));
        strategy.attach(&rules, Side::Home);

        let position = rules.initial_position();
        let action = strategy.choose_move(&position).unwrap();
        let next = rules.apply(&position, Side::Home, &action).unwrap();
        assert_eq!(next.nim_sum(), 0);
    }
}
