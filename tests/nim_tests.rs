//! Nim rules and closed-form play.
//!
//! Property tests cover the nim-sum invariants:
//! - From a non-zero nim-sum the closed form always reaches nim-sum 0
//! - From nim-sum 0 every legal move leaves a non-zero nim-sum

use proptest::prelude::*;

use tabletop_ai::games::nim::{NimAction, NimPosition, NimRules};
use tabletop_ai::strategy::closed_form_move;
use tabletop_ai::{GameResult, GameRng, RulesEngine, Side};

/// Piles whose XOR is zero: random piles plus one that cancels them.
fn zero_sum_piles() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0_u32..16, 1..5)
        .prop_map(|mut piles| {
            let balance = piles.iter().fold(0, |acc, &p| acc ^ p);
            piles.push(balance);
            piles
        })
        .prop_filter("at least one object", |piles| piles.iter().any(|&p| p > 0))
}

fn piles_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0_u32..16, 1..6).prop_filter("at least one object", |piles| piles.iter().any(|&p| p > 0))
}

proptest! {
    #[test]
    fn test_closed_form_reaches_zero_sum(piles in piles_strategy(), seed in any::<u64>()) {
        let rules = NimRules::new(&piles).unwrap();
        let position = NimPosition::new(&piles, Some(Side::Home));
        prop_assume!(position.nim_sum() != 0);

        let mut rng = GameRng::new(seed);
        let action = closed_form_move(&piles, &mut rng).unwrap();
        let next = rules.apply(&position, Side::Home, &action).unwrap();
        prop_assert_eq!(next.nim_sum(), 0);
    }

    #[test]
    fn test_zero_sum_has_no_good_move(piles in zero_sum_piles()) {
        let rules = NimRules::new(&piles).unwrap();
        let position = NimPosition::new(&piles, Some(Side::Away));
        prop_assert_eq!(position.nim_sum(), 0);

        for action in rules.legal_actions(&position, Side::Away) {
            let next = rules.apply(&position, Side::Away, &action).unwrap();
            prop_assert_ne!(next.nim_sum(), 0);
        }
    }

    #[test]
    fn test_closed_form_is_always_legal(piles in piles_strategy(), seed in any::<u64>()) {
        let rules = NimRules::new(&piles).unwrap();
        let position = NimPosition::new(&piles, Some(Side::Home));

        let mut rng = GameRng::new(seed);
        let action = closed_form_move(&piles, &mut rng).unwrap();
        prop_assert!(rules.apply(&position, Side::Home, &action).is_ok());
    }
}

#[test]
fn test_taking_last_object_loses() {
    let rules = NimRules::new(&[0, 2]).unwrap();
    let position = rules.parse_position("1,0,2").unwrap();

    let next = rules.apply(&position, Side::Away, &NimAction::new(1, 2)).unwrap();
    assert_eq!(rules.is_terminal(&next), Some(GameResult::Winner(Side::Home)));

    // Leaving one object forces Home to take it.
    let next = rules.apply(&position, Side::Away, &NimAction::new(1, 1)).unwrap();
    assert_eq!(rules.is_terminal(&next), None);
    let last = rules.apply(&next, Side::Home, &NimAction::new(1, 1)).unwrap();
    assert_eq!(rules.is_terminal(&last), Some(GameResult::Winner(Side::Away)));
}

#[test]
fn test_state_and_move_wire_format() {
    let rules = NimRules::default();
    let position = rules.initial_position();
    assert_eq!(rules.serialize_position(&position), "0,3,5,7");
    assert_eq!(rules.position_key(&position), "3-5-7");

    let action = rules.parse_action(" 2, 4 ").unwrap();
    assert_eq!(action, NimAction::new(2, 4));
    assert_eq!(rules.format_action(&action), "2,4");

    let unknown = rules.parse_position("-1,1,1").unwrap();
    assert_eq!(unknown.turn, None);
    assert!(rules.legal_actions(&unknown, Side::Home).is_empty());
}
