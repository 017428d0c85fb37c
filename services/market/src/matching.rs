//! Pair classification and compatibility checks
//!
//! Matching is by explicit order-id pair, not price-time priority. The
//! functions here are pure: they inspect the two orders and decide which
//! settlement rule applies, in the exact check order the settlement
//! semantics depend on. Stateful checks (seller inventory, escrow
//! sufficiency) live in the market layer between these calls.

use serde::{Deserialize, Serialize};
use types::errors::MarketError;
use types::numeric::{Quantity, PRICE_MAX_BPS};
use types::order::{Order, Outcome, Side};

/// Which settlement rule a matched pair follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Buy vs sell on the same outcome: existing shares move from seller
    /// to buyer at the seller's price.
    Transfer,
    /// Two complementary buys whose prices sum to 100%: a new YES/NO
    /// share pair is created from the combined escrow.
    Synthesis,
}

/// Classify a pair by sides. First matching rule wins; anything that is
/// not buy-sell or buy-buy matches no rule.
pub fn classify(side1: Side, side2: Side) -> Result<MatchKind, MarketError> {
    match (side1, side2) {
        (Side::BUY, Side::SELL) => Ok(MatchKind::Transfer),
        (Side::BUY, Side::BUY) => Ok(MatchKind::Synthesis),
        (side1, side2) => Err(MarketError::InvalidOrderPair {
            side1: side1.to_string(),
            side2: side2.to_string(),
        }),
    }
}

/// Fill quantity for a pair: the smaller remaining quantity.
///
/// A zero remaining cannot occur for pending orders but is guarded
/// defensively.
pub fn fill_quantity(order1: &Order, order2: &Order) -> Result<Quantity, MarketError> {
    if order1.remaining.is_zero() || order2.remaining.is_zero() {
        return Err(MarketError::InvalidQuantity(
            "cannot match an order with zero remaining quantity".to_string(),
        ));
    }
    Ok(order1.remaining.min(order2.remaining))
}

/// Transfer rule: both orders must be on the same outcome.
pub fn check_transfer_outcomes(buy: &Order, sell: &Order) -> Result<(), MarketError> {
    if buy.outcome != sell.outcome {
        return Err(MarketError::IncompatibleOrders(format!(
            "buy is {} but sell is {}; a transfer needs one outcome",
            buy.outcome, sell.outcome
        )));
    }
    Ok(())
}

/// Transfer rule: the buyer's bid must be at least the seller's ask.
pub fn check_transfer_prices(buy: &Order, sell: &Order) -> Result<(), MarketError> {
    if buy.price < sell.price {
        return Err(MarketError::PriceMismatch(format!(
            "bid {} below ask {}",
            buy.price, sell.price
        )));
    }
    Ok(())
}

/// Synthesis rule: first order buys YES, second buys NO, and the prices
/// are exact complements.
pub fn check_synthesis(buy_yes: &Order, buy_no: &Order) -> Result<(), MarketError> {
    if buy_yes.outcome != Outcome::YES || buy_no.outcome != Outcome::NO {
        return Err(MarketError::IncompatibleOrders(
            "synthesis takes the YES buy first and the NO buy second".to_string(),
        ));
    }
    let sum = buy_yes.price.bps() + buy_no.price.bps();
    if sum != PRICE_MAX_BPS {
        return Err(MarketError::PriceMismatch(format!(
            "prices sum to {sum} bps, expected exactly {PRICE_MAX_BPS}"
        )));
    }
    Ok(())
}
