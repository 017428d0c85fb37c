//! Per-user, per-outcome share balances
//!
//! Positions are created implicitly (absent users read as zero) and only
//! move through checked credit/debit, so no mutation can under- or
//! overflow a balance.

use std::collections::HashMap;
use types::errors::MarketError;
use types::ids::UserId;
use types::numeric::Quantity;
use types::order::Outcome;
use types::position::Position;

/// Owns all share positions, keyed by user.
#[derive(Debug, Default)]
pub struct PositionLedger {
    positions: HashMap<UserId, Position>,
}

impl PositionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A user's position (zero for unknown users).
    pub fn position(&self, user: &UserId) -> Position {
        self.positions.get(user).copied().unwrap_or_default()
    }

    /// Balance held by `user` in `outcome`.
    pub fn balance(&self, user: &UserId, outcome: Outcome) -> Quantity {
        self.position(user).balance(outcome)
    }

    /// Add shares to a user's outcome balance.
    pub fn credit(
        &mut self,
        user: UserId,
        outcome: Outcome,
        quantity: Quantity,
    ) -> Result<(), MarketError> {
        self.positions
            .entry(user)
            .or_default()
            .credit(outcome, quantity)
            .ok_or(MarketError::Overflow)
    }

    /// Remove shares from a user's outcome balance.
    pub fn debit(
        &mut self,
        user: &UserId,
        outcome: Outcome,
        quantity: Quantity,
    ) -> Result<(), MarketError> {
        let held = self.balance(user, outcome);
        self.positions
            .entry(*user)
            .or_default()
            .debit(outcome, quantity)
            .ok_or(MarketError::InsufficientShares {
                outcome,
                required: quantity,
                held,
            })
    }

    /// Zero both of a user's outcome balances, returning the position as
    /// it stood beforehand.
    pub fn clear(&mut self, user: &UserId) -> Position {
        let before = self.position(user);
        if let Some(position) = self.positions.get_mut(user) {
            position.clear();
        }
        before
    }

    /// Total shares outstanding in one outcome across all users.
    pub fn total_outstanding(&self, outcome: Outcome) -> Quantity {
        self.positions
            .values()
            .fold(Quantity::ZERO, |total, position| {
                total
                    .checked_add(position.balance(outcome))
                    .expect("total outstanding overflows u128")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_reads_zero() {
        let ledger = PositionLedger::new();
        assert_eq!(ledger.balance(&UserId::new(), Outcome::YES), Quantity::ZERO);
    }

    #[test]
    fn test_credit_then_debit() {
        let mut ledger = PositionLedger::new();
        let alice = UserId::new();

        ledger
            .credit(alice, Outcome::YES, Quantity::from_whole(150))
            .unwrap();
        ledger
            .debit(&alice, Outcome::YES, Quantity::from_whole(60))
            .unwrap();

        assert_eq!(ledger.balance(&alice, Outcome::YES), Quantity::from_whole(90));
        assert_eq!(ledger.balance(&alice, Outcome::NO), Quantity::ZERO);
    }

    #[test]
    fn test_debit_insufficient_shares() {
        let mut ledger = PositionLedger::new();
        let alice = UserId::new();
        ledger
            .credit(alice, Outcome::NO, Quantity::from_whole(5))
            .unwrap();

        let result = ledger.debit(&alice, Outcome::NO, Quantity::from_whole(6));
        assert_eq!(
            result,
            Err(MarketError::InsufficientShares {
                outcome: Outcome::NO,
                required: Quantity::from_whole(6),
                held: Quantity::from_whole(5),
            })
        );
        // Balance unchanged on failure
        assert_eq!(ledger.balance(&alice, Outcome::NO), Quantity::from_whole(5));
    }

    #[test]
    fn test_clear_returns_prior_position() {
        let mut ledger = PositionLedger::new();
        let alice = UserId::new();
        ledger
            .credit(alice, Outcome::YES, Quantity::from_whole(7))
            .unwrap();

        let before = ledger.clear(&alice);
        assert_eq!(before.balance(Outcome::YES), Quantity::from_whole(7));
        assert_eq!(ledger.balance(&alice, Outcome::YES), Quantity::ZERO);

        // Clearing an unknown user is a no-op
        let empty = ledger.clear(&UserId::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_total_outstanding_sums_across_users() {
        let mut ledger = PositionLedger::new();
        ledger
            .credit(UserId::new(), Outcome::YES, Quantity::from_whole(10))
            .unwrap();
        ledger
            .credit(UserId::new(), Outcome::YES, Quantity::from_whole(20))
            .unwrap();
        ledger
            .credit(UserId::new(), Outcome::NO, Quantity::from_whole(5))
            .unwrap();

        assert_eq!(
            ledger.total_outstanding(Outcome::YES),
            Quantity::from_whole(30)
        );
        assert_eq!(
            ledger.total_outstanding(Outcome::NO),
            Quantity::from_whole(5)
        );
    }
}
