//! Simulated bank replies

use rand::Rng;

use shared::{RecipientId, ResponseOutcome};
use crate::traits::OutcomeSelector;

/// Picks one of the three replies uniformly at random
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOutcomeSelector;

impl RandomOutcomeSelector {
    pub fn new() -> Self {
        Self
    }
}

impl OutcomeSelector for RandomOutcomeSelector {
    fn select(&self, _recipient: &RecipientId) -> ResponseOutcome {
        let index = rand::thread_rng().gen_range(0..ResponseOutcome::ALL.len());
        ResponseOutcome::ALL[index]
    }
}

/// Always answers with the same reply
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcomeSelector(pub ResponseOutcome);

impl OutcomeSelector for FixedOutcomeSelector {
    fn select(&self, _recipient: &RecipientId) -> ResponseOutcome {
        self.0
    }
}
