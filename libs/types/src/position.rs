//! Position tracking types
//!
//! A position is a user's share balance in each outcome. Created
//! implicitly (defaults to zero), mutated by matching (share creation and
//! transfer) and claim (zeroed).

use crate::numeric::Quantity;
use crate::order::Outcome;
use serde::{Deserialize, Serialize};

/// Per-user YES/NO share balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub yes: Quantity,
    pub no: Quantity,
}

impl Position {
    /// Empty position
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance held in one outcome
    pub fn balance(&self, outcome: Outcome) -> Quantity {
        match outcome {
            Outcome::YES => self.yes,
            Outcome::NO => self.no,
        }
    }

    /// Add shares to one outcome, checking for overflow
    pub fn credit(&mut self, outcome: Outcome, quantity: Quantity) -> Option<()> {
        let slot = self.slot_mut(outcome);
        *slot = slot.checked_add(quantity)?;
        Some(())
    }

    /// Remove shares from one outcome
    ///
    /// Returns None when the balance is insufficient; the position is
    /// unchanged in that case.
    pub fn debit(&mut self, outcome: Outcome, quantity: Quantity) -> Option<()> {
        let slot = self.slot_mut(outcome);
        *slot = slot.checked_sub(quantity)?;
        Some(())
    }

    /// Zero both outcome balances (claim semantics)
    pub fn clear(&mut self) {
        self.yes = Quantity::ZERO;
        self.no = Quantity::ZERO;
    }

    /// True when both balances are zero
    pub fn is_empty(&self) -> bool {
        self.yes.is_zero() && self.no.is_zero()
    }

    fn slot_mut(&mut self, outcome: Outcome) -> &mut Quantity {
        match outcome {
            Outcome::YES => &mut self.yes,
            Outcome::NO => &mut self.no,
        }
    }
}
