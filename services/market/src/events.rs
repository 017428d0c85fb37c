//! Market events
//!
//! Immutable records appended by market operations, drainable by callers
//! for notification or audit. The log is the market's only observability
//! surface; nothing else is emitted.

use crate::matching::MatchKind;
use serde::{Deserialize, Serialize};
use types::ids::{OrderId, UserId};
use types::numeric::{Price, Quantity, TokenAmount};
use types::order::{Outcome, Side};

/// An order was accepted and stored as pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub owner: UserId,
    pub order_id: OrderId,
    pub side: Side,
    pub outcome: Outcome,
    pub price: Price,
    pub quantity: Quantity,
    /// Tokens pulled into escrow (zero for sell orders)
    pub escrow: TokenAmount,
}

/// A pending order was cancelled by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub owner: UserId,
    pub order_id: OrderId,
    /// Escrow returned to the owner (zero for sell orders)
    pub refund: TokenAmount,
}

/// Two orders were matched and settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersMatched {
    pub kind: MatchKind,
    pub user1: UserId,
    pub order1: OrderId,
    pub user2: UserId,
    pub order2: OrderId,
    pub fill: Quantity,
    /// Escrow paid to the seller (zero for synthesis)
    pub seller_proceeds: TokenAmount,
    /// Price-difference escrow returned to the buyer on a completing fill
    pub buyer_refund: TokenAmount,
}

/// The market resolved to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub outcome: Outcome,
}

/// A user claimed a payout after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutClaimed {
    pub user: UserId,
    pub outcome: Outcome,
    pub payout: TokenAmount,
}

/// Enum wrapper for all market events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    OrderPlaced(OrderPlaced),
    OrderCancelled(OrderCancelled),
    OrdersMatched(OrdersMatched),
    Resolved(Resolved),
    PayoutClaimed(PayoutClaimed),
}
