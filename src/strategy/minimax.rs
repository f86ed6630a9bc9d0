//! Exhaustive minimax play.

use std::marker::PhantomData;

use log::debug;

use super::{attached, or_fallback, Attachment, Strategy};
use crate::core::Side;
use crate::error::{Error, Result};
use crate::rules::RulesEngine;
use crate::search::{minimax, TerminalUtility};

/// Plays the minimax-optimal move by searching every line to the end.
///
/// Only practical for small games such as Tic-Tac-Toe. Keeps no experience.
#[derive(Debug)]
pub struct ExactMinimax<E: RulesEngine> {
    attachment: Option<Attachment<E>>,
    _rules: PhantomData<E>,
}

impl<E: RulesEngine> Default for ExactMinimax<E> {
    fn default() -> Self {
        Self {
            attachment: None,
            _rules: PhantomData,
        }
    }
}

impl<E: RulesEngine> ExactMinimax<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn compute(&self, position: &E::Position) -> Result<E::Action> {
        let Attachment { rules, side } = attached(&self.attachment)?;
        let outcome = minimax(rules, position, *side, &TerminalUtility).ok_or(Error::NoLegalMoves)?;
        debug!(
            "minimax: {} plays {} (value {}, {} nodes)",
            side,
            rules.format_action(&outcome.action),
            outcome.value,
            outcome.nodes
        );
        Ok(outcome.action)
    }
}

impl<E: RulesEngine> Strategy<E> for ExactMinimax<E> {
    fn name(&self) -> &'static str {
        "exact-minimax"
    }

    fn attach(&mut self, rules: &E, side: Side) {
        self.attachment = Some(Attachment {
            rules: rules.clone(),
            side,
        });
    }

    fn choose_move(&mut self, position: &E::Position) -> Option<E::Action> {
        Some(or_fallback::<E>(self.name(), self.compute(position)))
    }
}
