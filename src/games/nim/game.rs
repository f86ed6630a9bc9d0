//! Nim rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Side;
use crate::error::{Error, IllegalReason, Result};
use crate::games::parse_turn;
use crate::rules::{GameResult, RulesEngine};

/// Piles used when none are configured.
pub const DEFAULT_PILES: [u32; 3] = [3, 5, 7];

/// Pile sizes, inline for the usual handful of piles.
pub type Piles = SmallVec<[u32; 8]>;

/// Nim position: pile sizes plus the turn owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NimPosition {
    pub piles: Piles,
    pub turn: Option<Side>,
}

impl NimPosition {
    #[must_use]
    pub fn new(piles: &[u32], turn: Option<Side>) -> Self {
        Self {
            piles: piles.iter().copied().collect(),
            turn,
        }
    }

    /// XOR of all pile sizes.
    #[must_use]
    pub fn nim_sum(&self) -> u32 {
        self.piles.iter().fold(0, |acc, &p| acc ^ p)
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.piles.iter().all(|&p| p == 0)
    }
}

/// Remove `count` objects from pile `pile`. Wire form is `pile,count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NimAction {
    pub pile: usize,
    pub count: u32,
}

impl NimAction {
    #[must_use]
    pub const fn new(pile: usize, count: u32) -> Self {
        Self { pile, count }
    }
}

/// Misère Nim: whoever takes the last object loses.
#[derive(Clone, Debug)]
pub struct NimRules {
    initial_piles: Piles,
}

impl Default for NimRules {
    fn default() -> Self {
        Self {
            initial_piles: DEFAULT_PILES.iter().copied().collect(),
        }
    }
}

impl NimRules {
    /// Rules starting from `piles`. At least one pile is required.
    pub fn new(piles: &[u32]) -> Result<Self> {
        if piles.is_empty() {
            return Err(Error::invalid_config("nim needs at least one pile"));
        }
        Ok(Self {
            initial_piles: piles.iter().copied().collect(),
        })
    }

    #[must_use]
    pub fn initial_piles(&self) -> &[u32] {
        &self.initial_piles
    }

    fn illegal(side: Side, action: &NimAction, reason: IllegalReason) -> Error {
        Error::IllegalMove {
            side,
            action: format!("{},{}", action.pile, action.count),
            reason,
        }
    }
}

impl RulesEngine for NimRules {
    type Position = NimPosition;
    type Action = NimAction;

    fn name(&self) -> &'static str {
        "nim"
    }

    fn initial_position(&self) -> NimPosition {
        NimPosition {
            piles: self.initial_piles.clone(),
            turn: Some(Side::Home),
        }
    }

    fn to_move(&self, position: &NimPosition) -> Option<Side> {
        position.turn
    }

    fn legal_actions(&self, position: &NimPosition, side: Side) -> Vec<NimAction> {
        if position.turn != Some(side) {
            return Vec::new();
        }
        position
            .piles
            .iter()
            .enumerate()
            .flat_map(|(pile, &size)| (1..=size).map(move |count| NimAction::new(pile, count)))
            .collect()
    }

    fn apply(&self, position: &NimPosition, side: Side, action: &NimAction) -> Result<NimPosition> {
        if position.is_cleared() {
            return Err(Self::illegal(side, action, IllegalReason::GameOver));
        }
        if position.turn != Some(side) {
            return Err(Self::illegal(side, action, IllegalReason::WrongTurn));
        }
        let size = *position
            .piles
            .get(action.pile)
            .ok_or_else(|| Self::illegal(side, action, IllegalReason::OutOfRange))?;
        if action.count == 0 || action.count > size {
            return Err(Self::illegal(side, action, IllegalReason::InvalidCount));
        }

        let mut next = position.clone();
        next.piles[action.pile] = size - action.count;
        next.turn = Some(side.opponent());
        Ok(next)
    }

    fn pass(&self, position: &NimPosition) -> NimPosition {
        let mut next = position.clone();
        next.turn = position.turn.map(Side::opponent);
        next
    }

    fn is_terminal(&self, position: &NimPosition) -> Option<GameResult> {
        if !position.is_cleared() {
            return None;
        }
        // The opponent took the last object, so the side to move wins.
        Some(match position.turn {
            Some(side) => GameResult::Winner(side),
            None => GameResult::Draw,
        })
    }

    fn serialize_position(&self, position: &NimPosition) -> String {
        let mut out = Side::turn_code(position.turn).to_string();
        for pile in &position.piles {
            out.push(',');
            out.push_str(&pile.to_string());
        }
        out
    }

    fn parse_position(&self, text: &str) -> Result<NimPosition> {
        let mut fields = text.trim().split(',');
        let turn = parse_turn(text, fields.next())?;
        let piles = fields
            .map(|field| {
                field
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| Error::state_format(text, format!("bad pile size '{field}'")))
            })
            .collect::<Result<Piles>>()?;
        if piles.is_empty() {
            return Err(Error::state_format(text, "no piles"));
        }
        Ok(NimPosition { piles, turn })
    }

    fn format_action(&self, action: &NimAction) -> String {
        format!("{},{}", action.pile, action.count)
    }

    fn parse_action(&self, text: &str) -> Result<NimAction> {
        let (pile, count) = text
            .trim()
            .split_once(',')
            .ok_or_else(|| Error::move_format(text, "expected 'pile,count'"))?;
        let pile = pile
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::move_format(text, "pile is not a number"))?;
        let count = count
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::move_format(text, "count is not a number"))?;
        Ok(NimAction { pile, count })
    }

    fn position_key(&self, position: &NimPosition) -> String {
        position
            .piles
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }

    fn fallback_action() -> NimAction {
        NimAction::new(0, 0)
    }
}
