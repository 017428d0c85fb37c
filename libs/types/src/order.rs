//! Order lifecycle types
//!
//! Orders are resting limit orders on one outcome of a binary market.
//! Status is a forward-only machine: PENDING → FILLED when remaining hits
//! zero, PENDING → CANCELLED on explicit cancel; both are terminal.

use crate::ids::{OrderId, UserId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "BUY"),
            Side::SELL => write!(f, "SELL"),
        }
    }
}

/// One of the two mutually exclusive resolution states of the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// The event happens
    YES,
    /// The event does not happen
    NO,
}

impl Outcome {
    /// Get the complementary outcome
    pub fn complement(&self) -> Self {
        match self {
            Outcome::YES => Outcome::NO,
            Outcome::NO => Outcome::YES,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::YES => write!(f, "YES"),
            Outcome::NO => write!(f, "NO"),
        }
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Accepted and awaiting matching
    Pending,
    /// Completely matched (terminal)
    Filled,
    /// Cancelled by owner (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Filled => write!(f, "FILLED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A resting limit order on one outcome
///
/// `remaining` is non-negative and never increases after creation. The
/// mutators here assert invariants and are only reached after the market
/// layer's validation has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub owner: UserId,
    pub side: Side,
    pub outcome: Outcome,
    pub price: Price,
    pub quantity: Quantity,
    pub remaining: Quantity,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
    pub updated_at: i64, // Unix nanos
    pub version: u64,    // Optimistic locking
}

impl Order {
    /// Create a new pending order with remaining = quantity
    pub fn new(
        id: OrderId,
        owner: UserId,
        side: Side,
        outcome: Outcome,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            owner,
            side,
            outcome,
            price,
            quantity,
            remaining: quantity,
            status: OrderStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        }
    }

    /// Quantity invariant: remaining never exceeds the original quantity
    pub fn check_invariant(&self) -> bool {
        self.remaining <= self.quantity
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        matches!(self.status, OrderStatus::Filled)
    }

    /// Check if the order can still participate in matching
    pub fn is_pending(&self) -> bool {
        matches!(self.status, OrderStatus::Pending)
    }

    /// Reduce remaining by a fill and adjust status
    ///
    /// # Panics
    /// Panics if the order is not pending or the fill exceeds remaining.
    pub fn fill(&mut self, fill_quantity: Quantity, timestamp: i64) {
        assert!(self.is_pending(), "Cannot fill a non-pending order");

        let new_remaining = self
            .remaining
            .checked_sub(fill_quantity)
            .expect("Fill would exceed remaining quantity");

        self.remaining = new_remaining;
        if self.remaining.is_zero() {
            self.status = OrderStatus::Filled;
        }
        self.updated_at = timestamp;
        self.version += 1;

        assert!(self.check_invariant(), "Invariant violated after fill");
    }

    /// Cancel the order
    ///
    /// # Panics
    /// Panics if the order is already in a terminal state.
    pub fn cancel(&mut self, timestamp: i64) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");

        self.status = OrderStatus::Cancelled;
        self.updated_at = timestamp;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1708123456789000000;

    fn sample_order(side: Side, outcome: Outcome) -> Order {
        Order::new(
            OrderId::FIRST,
            UserId::new(),
            side,
            outcome,
            Price::from_percent(50).unwrap(),
            Quantity::from_whole(100),
            TS,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::BUY.opposite(), Side::SELL);
        assert_eq!(Side::SELL.opposite(), Side::BUY);
    }

    #[test]
    fn test_outcome_complement() {
        assert_eq!(Outcome::YES.complement(), Outcome::NO);
        assert_eq!(Outcome::NO.complement(), Outcome::YES);
    }

    #[test]
    fn test_order_creation() {
        let order = sample_order(Side::BUY, Outcome::YES);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.remaining, order.quantity);
        assert!(order.check_invariant());
        assert!(order.is_pending());
    }

    #[test]
    fn test_order_partial_fill() {
        let mut order = sample_order(Side::BUY, Outcome::YES);
        order.fill(Quantity::from_whole(30), TS + 1);

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.remaining, Quantity::from_whole(70));
        assert_eq!(order.version, 1);
        assert!(order.check_invariant());
    }

    #[test]
    fn test_order_complete_fill() {
        let mut order = sample_order(Side::BUY, Outcome::YES);
        order.fill(Quantity::from_whole(100), TS + 1);

        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.remaining.is_zero());
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "Fill would exceed remaining quantity")]
    fn test_order_overfill_panics() {
        let mut order = sample_order(Side::BUY, Outcome::YES);
        order.fill(Quantity::from_whole(150), TS + 1);
    }

    #[test]
    fn test_order_cancel() {
        let mut order = sample_order(Side::SELL, Outcome::NO);
        order.cancel(TS + 1);
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(order.status.is_terminal());
    }

    #[test]
    #[should_panic(expected = "Cannot cancel terminal order")]
    fn test_cancel_terminal_panics() {
        let mut order = sample_order(Side::BUY, Outcome::YES);
        order.fill(Quantity::from_whole(100), TS + 1);
        order.cancel(TS + 2);
    }

    #[test]
    #[should_panic(expected = "Cannot fill a non-pending order")]
    fn test_fill_cancelled_panics() {
        let mut order = sample_order(Side::BUY, Outcome::YES);
        order.cancel(TS + 1);
        order.fill(Quantity::from_whole(10), TS + 2);
    }

    #[test]
    fn test_order_serialization() {
        let order = sample_order(Side::SELL, Outcome::YES);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order.id, deserialized.id);
        assert_eq!(order.side, deserialized.side);
        assert_eq!(order.outcome, deserialized.outcome);
        assert_eq!(order.price, deserialized.price);
    }
}
