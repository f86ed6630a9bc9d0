//! Othello rules and heuristic play.
//!
//! Covers:
//! - Flipping along several directions at once
//! - End of game when neither side can move, whoever holds the turn
//! - Forfeit scoring
//! - A full 4×4 game between two alpha-beta seats

use tabletop_ai::games::othello::Board;
use tabletop_ai::{
    AlphaBetaConfig, Cell, GameResult, HeuristicAlphaBeta, MatchRunner, OthelloAction, OthelloPosition, OthelloRules,
    RulesEngine, Side, Strategy, StrategyFactory, Winner,
};

fn position(picture: &[&str], turn: Option<Side>) -> OthelloPosition {
    OthelloPosition {
        board: Board::from_rows(picture).unwrap(),
        turn,
    }
}

fn alpha_beta_factory() -> StrategyFactory<OthelloRules> {
    Box::new(|| Ok(Box::new(HeuristicAlphaBeta::default()) as Box<dyn Strategy<OthelloRules>>))
}

/// One placement flips north, west and north-west runs together.
#[test]
fn test_flips_in_several_directions() {
    let rules = OthelloRules::square(4).unwrap();
    let start = position(&["X-X-", "-OO-", "XO--", "----"], Some(Side::Home));

    assert_eq!(start.board.flips(Side::Home, 2, 2).len(), 3);

    let next = rules.apply(&start, Side::Home, &OthelloAction::new(2, 2)).unwrap();
    for (row, col) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        assert_eq!(next.board.at(row, col), Cell::Home, "({row}, {col})");
    }
    assert_eq!(next.board.count(Cell::Away), 0);

    // Nobody can move any more, so the game ends with Home holding the turn.
    assert_eq!(next.turn, Some(Side::Home));
    assert_eq!(rules.is_terminal(&next), Some(GameResult::Winner(Side::Home)));
}

/// A placement that flips nothing is rejected and leaves the position alone.
#[test]
fn test_no_flip_is_illegal() {
    let rules = OthelloRules::square(4).unwrap();
    let start = rules.initial_position();

    assert!(rules.apply(&start, Side::Home, &OthelloAction::new(0, 0)).is_err());
    assert!(rules.apply(&start, Side::Away, &OthelloAction::new(0, 1)).is_err());
    assert_eq!(start, rules.initial_position());
}

/// The game is over when neither side can move, regardless of the turn field.
#[test]
fn test_terminal_when_neither_side_can_move() {
    let rules = OthelloRules::square(4).unwrap();
    let picture = ["XXXX", "XXXX", "XXXX", "XX--"];

    for turn in [Some(Side::Home), Some(Side::Away), None] {
        let stuck = position(&picture, turn);
        assert_eq!(rules.is_terminal(&stuck), Some(GameResult::Winner(Side::Home)));
    }

    let level = position(&["XXXX", "XXXX", "OOOO", "OOOO"], Some(Side::Away));
    assert_eq!(rules.is_terminal(&level), Some(GameResult::Draw));
}

/// A side without a legal move passes; the opponent keeps playing.
#[test]
fn test_side_without_move_passes() {
    let rules = OthelloRules::square(4).unwrap();
    let start = position(&["XO--", "----", "----", "----"], Some(Side::Away));

    assert!(rules.legal_actions(&start, Side::Away).is_empty());
    assert_eq!(rules.is_terminal(&start), None);
    assert_eq!(rules.actions_to_move(&start).len(), 0);

    let passed = rules.pass(&start);
    assert_eq!(passed.turn, Some(Side::Home));
    assert_eq!(rules.legal_actions(&passed, Side::Home), vec![OthelloAction::new(0, 2)]);
}

/// Forfeit gives the winner every empty square and a strict lead.
#[test]
fn test_forfeit_score() {
    let rules = OthelloRules::square(4).unwrap();
    let crowded = position(&["OOOO", "OOOO", "OOOO", "OX--"], Some(Side::Home));

    let plain = rules.score(&crowded, None).unwrap();
    assert_eq!((plain.home, plain.away), (1, 13));

    let forfeit = rules.score(&crowded, Some(Side::Home)).unwrap();
    assert_eq!(forfeit.away, 13);
    assert_eq!(forfeit.home, 14);
}

/// Two alpha-beta seats at the default depth policy play a 4×4 game to its
/// natural end.
#[test]
fn test_alpha_beta_self_play_finishes() {
    let rules = OthelloRules::square(4).unwrap();
    assert_eq!(AlphaBetaConfig::default().depth_for(4, 4), 8);
    let mut runner = MatchRunner::new(rules, alpha_beta_factory(), alpha_beta_factory()).unwrap();

    let summary = runner.run().unwrap();
    let game = &summary.games[0];
    assert_eq!(game.forfeited, None);
    assert!(matches!(game.winner, Winner::Home | Winner::Away | Winner::Tie));

    let finished = rules.parse_position(&game.final_state).unwrap();
    assert!(rules.is_terminal(&finished).is_some());

    let score = game.score.unwrap();
    assert!(score.home + score.away <= 16);
    // Each placement adds exactly one disc to the four opening discs.
    assert_eq!((score.home + score.away) as usize, 4 + game.plies());
}
