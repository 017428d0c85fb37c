//! The market state machine
//!
//! `Market` ties the order ledger, position ledger, matching rules, and
//! the external payment token together. It is strictly sequential: every
//! mutating operation takes `&mut self`, validates completely, and only
//! then mutates, so any failure leaves no partial state. Callers that
//! need sharing wrap the market in their own lock.

use chrono::Utc;
use token::PaymentToken;
use types::errors::MarketError;
use types::ids::{OrderId, UserId};
use types::numeric::{Price, Quantity, TokenAmount};
use types::order::{Order, Outcome, Side};
use types::position::Position;

use crate::conversion;
use crate::events::{
    MarketEvent, OrderCancelled, OrderPlaced, OrdersMatched, PayoutClaimed, Resolved,
};
use crate::matching::{self, MatchKind};
use crate::orders::OrderStore;
use crate::positions::PositionLedger;

/// Resolution state: open until the owner resolves, then locked forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Open,
    Resolved(Outcome),
}

/// Settlement summary returned by a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    pub kind: MatchKind,
    pub fill: Quantity,
    /// Escrow paid to the seller (zero for synthesis)
    pub seller_proceeds: TokenAmount,
    /// Price-difference escrow returned to the buyer on a completing fill
    pub buyer_refund: TokenAmount,
}

/// A binary-outcome prediction market over one payment token.
pub struct Market<T: PaymentToken> {
    name: String,
    owner: UserId,
    matcher: UserId,
    /// The market's custody identity in the token ledger; buy-order
    /// escrow and claim payouts flow through this account.
    escrow_account: UserId,
    token: T,
    /// Captured once at construction; the token's precision is immutable.
    token_decimals: u32,
    orders: OrderStore,
    positions: PositionLedger,
    resolution: Resolution,
    events: Vec<MarketEvent>,
}

impl<T: PaymentToken> Market<T> {
    /// Create an open market owned (and matched) by `owner`.
    pub fn new(name: impl Into<String>, owner: UserId, token: T) -> Self {
        let token_decimals = token.decimals();
        Self {
            name: name.into(),
            owner,
            matcher: owner,
            escrow_account: UserId::new(),
            token,
            token_decimals,
            orders: OrderStore::new(),
            positions: PositionLedger::new(),
            resolution: Resolution::Open,
            events: Vec::new(),
        }
    }

    // ───────────────────────── Orders ─────────────────────────

    /// Place a resting limit order.
    ///
    /// Buys escrow their full cost up front via an allowance-gated pull;
    /// the cost must convert to a whole number of token units, keeping
    /// every escrowed order fully backed. Sells are checked against the
    /// owner's current share balance but escrow no shares.
    pub fn place_order(
        &mut self,
        owner: UserId,
        side: Side,
        outcome: Outcome,
        quantity: Quantity,
        price: Price,
    ) -> Result<OrderId, MarketError> {
        self.ensure_open()?;
        if quantity.is_zero() {
            return Err(MarketError::InvalidQuantity(
                "order quantity must be positive".to_string(),
            ));
        }

        let escrow = match side {
            Side::BUY => {
                let cost = conversion::share_cost_exact(quantity, price, self.token_decimals)?;
                let available = self.token.balance_of(&owner);
                if available < cost {
                    return Err(MarketError::InsufficientFunds {
                        required: cost,
                        available,
                    });
                }
                let custody = self.escrow_account;
                self.token.pull(&owner, &custody, cost)?;
                cost
            }
            Side::SELL => {
                let held = self.positions.balance(&owner, outcome);
                if held < quantity {
                    return Err(MarketError::InsufficientShares {
                        outcome,
                        required: quantity,
                        held,
                    });
                }
                TokenAmount::ZERO
            }
        };

        let order_id = self
            .orders
            .insert(owner, side, outcome, price, quantity, now());
        self.events.push(MarketEvent::OrderPlaced(OrderPlaced {
            owner,
            order_id,
            side,
            outcome,
            price,
            quantity,
            escrow,
        }));
        Ok(order_id)
    }

    /// Cancel a pending order, refunding any remaining buy escrow.
    ///
    /// Permitted after resolution: escrowed funds stay recoverable no
    /// matter what the market did.
    pub fn cancel_order(
        &mut self,
        owner: UserId,
        order_id: OrderId,
    ) -> Result<TokenAmount, MarketError> {
        let (side, price, remaining) = {
            let order = self
                .orders
                .get(&owner, order_id)
                .ok_or(MarketError::OrderNotFound { owner, order_id })?;
            if !order.is_pending() {
                return Err(MarketError::InvalidOrderState {
                    order_id,
                    status: order.status,
                });
            }
            (order.side, order.price, order.remaining)
        };

        let refund = match side {
            Side::BUY => conversion::share_cost(remaining, price, self.token_decimals)?,
            Side::SELL => TokenAmount::ZERO,
        };
        if !refund.is_zero() {
            let custody = self.escrow_account;
            self.token.transfer(&custody, &owner, refund)?;
        }

        self.orders
            .get_mut(&owner, order_id)
            .ok_or(MarketError::OrderNotFound { owner, order_id })?
            .cancel(now());
        self.events.push(MarketEvent::OrderCancelled(OrderCancelled {
            owner,
            order_id,
            refund,
        }));
        Ok(refund)
    }

    // ───────────────────────── Matching ─────────────────────────

    /// Pair two pending orders and settle the fill. Matcher-only.
    ///
    /// The pair is classified by sides (buy-sell transfer or buy-buy
    /// synthesis); all checks run before the first mutation, and the
    /// post-settlement order update is identical for both kinds.
    pub fn match_orders(
        &mut self,
        caller: UserId,
        user1: UserId,
        order_id1: OrderId,
        user2: UserId,
        order_id2: OrderId,
    ) -> Result<MatchReport, MarketError> {
        if caller != self.matcher {
            return Err(MarketError::Unauthorized { caller });
        }
        self.ensure_open()?;
        if user1 == user2 {
            return Err(MarketError::SelfMatch);
        }

        let order1 = self.pending_order(&user1, order_id1)?.clone();
        let order2 = self.pending_order(&user2, order_id2)?.clone();

        let fill = matching::fill_quantity(&order1, &order2)?;
        let report = match matching::classify(order1.side, order2.side)? {
            MatchKind::Transfer => self.settle_transfer(&order1, &order2, fill)?,
            MatchKind::Synthesis => self.settle_synthesis(&order1, &order2, fill)?,
        };

        // Fill both orders: the smaller one flips to FILLED, the larger
        // stays PENDING with the difference remaining.
        let ts = now();
        self.orders
            .get_mut(&user1, order_id1)
            .ok_or(MarketError::OrderNotFound {
                owner: user1,
                order_id: order_id1,
            })?
            .fill(fill, ts);
        self.orders
            .get_mut(&user2, order_id2)
            .ok_or(MarketError::OrderNotFound {
                owner: user2,
                order_id: order_id2,
            })?
            .fill(fill, ts);

        self.events.push(MarketEvent::OrdersMatched(OrdersMatched {
            kind: report.kind,
            user1,
            order1: order_id1,
            user2,
            order2: order_id2,
            fill,
            seller_proceeds: report.seller_proceeds,
            buyer_refund: report.buyer_refund,
        }));
        Ok(report)
    }

    /// Buy-sell settlement: move existing shares from seller to buyer,
    /// paying the seller's price out of the buyer's escrow. The bid-ask
    /// difference is refunded only on the fill that completes the buy
    /// order; until then the over-escrow stays reserved for the order's
    /// remaining quantity.
    fn settle_transfer(
        &mut self,
        buy: &Order,
        sell: &Order,
        fill: Quantity,
    ) -> Result<MatchReport, MarketError> {
        matching::check_transfer_outcomes(buy, sell)?;

        let held = self.positions.balance(&sell.owner, sell.outcome);
        if held < fill {
            return Err(MarketError::InsufficientShares {
                outcome: sell.outcome,
                required: fill,
                held,
            });
        }

        matching::check_transfer_prices(buy, sell)?;

        let proceeds = conversion::share_cost(fill, sell.price, self.token_decimals)?;
        let completes_buy = fill == buy.remaining;
        let refund = match buy.price.checked_sub(sell.price) {
            Some(diff) if completes_buy => {
                conversion::share_cost(fill, diff, self.token_decimals)?
            }
            _ => TokenAmount::ZERO,
        };

        // Everything below must succeed, so escrow sufficiency and the
        // buyer's position headroom are validated before the first transfer.
        self.positions
            .balance(&buy.owner, buy.outcome)
            .checked_add(fill)
            .ok_or(MarketError::Overflow)?;
        let required = proceeds.checked_add(refund).ok_or(MarketError::Overflow)?;
        let custody = self.escrow_account;
        let available = self.token.balance_of(&custody);
        if available < required {
            return Err(MarketError::InsufficientFunds {
                required,
                available,
            });
        }

        self.token.transfer(&custody, &sell.owner, proceeds)?;
        if !refund.is_zero() {
            self.token.transfer(&custody, &buy.owner, refund)?;
        }
        self.positions.debit(&sell.owner, sell.outcome, fill)?;
        self.positions.credit(buy.owner, buy.outcome, fill)?;

        Ok(MatchReport {
            kind: MatchKind::Transfer,
            fill,
            seller_proceeds: proceeds,
            buyer_refund: refund,
        })
    }

    /// Buy-buy settlement: both sides already escrowed their own cost, so
    /// no tokens move; a new YES/NO share pair is created instead.
    fn settle_synthesis(
        &mut self,
        buy_yes: &Order,
        buy_no: &Order,
        fill: Quantity,
    ) -> Result<MatchReport, MarketError> {
        matching::check_synthesis(buy_yes, buy_no)?;

        // Pre-check both credits so the second cannot fail after the first
        self.positions
            .balance(&buy_yes.owner, Outcome::YES)
            .checked_add(fill)
            .ok_or(MarketError::Overflow)?;
        self.positions
            .balance(&buy_no.owner, Outcome::NO)
            .checked_add(fill)
            .ok_or(MarketError::Overflow)?;

        self.positions.credit(buy_yes.owner, Outcome::YES, fill)?;
        self.positions.credit(buy_no.owner, Outcome::NO, fill)?;

        Ok(MatchReport {
            kind: MatchKind::Synthesis,
            fill,
            seller_proceeds: TokenAmount::ZERO,
            buyer_refund: TokenAmount::ZERO,
        })
    }

    // ───────────────────────── Lifecycle ─────────────────────────

    /// Resolve the market to an outcome. Owner-only, one-way.
    pub fn resolve(&mut self, caller: UserId, outcome: Outcome) -> Result<(), MarketError> {
        if caller != self.owner {
            return Err(MarketError::Unauthorized { caller });
        }
        if self.is_resolved() {
            return Err(MarketError::AlreadyResolved);
        }
        self.resolution = Resolution::Resolved(outcome);
        self.events
            .push(MarketEvent::Resolved(Resolved { outcome }));
        Ok(())
    }

    /// Claim a payout after resolution.
    ///
    /// Zeroes both of the user's outcome balances unconditionally, so
    /// losers and non-holders can claim to clear state; a second claim
    /// is a zero-payout success, not an error.
    pub fn claim(&mut self, user: UserId) -> Result<TokenAmount, MarketError> {
        let outcome = match self.resolution {
            Resolution::Resolved(outcome) => outcome,
            Resolution::Open => return Err(MarketError::NotResolved),
        };

        let winning = self.positions.balance(&user, outcome);
        let payout = if winning.is_zero() {
            TokenAmount::ZERO
        } else {
            conversion::redemption_value(winning, self.token_decimals)?
        };

        if !payout.is_zero() {
            let custody = self.escrow_account;
            let available = self.token.balance_of(&custody);
            if available < payout {
                return Err(MarketError::InsufficientFunds {
                    required: payout,
                    available,
                });
            }
            self.token.transfer(&custody, &user, payout)?;
        }
        self.positions.clear(&user);

        if !payout.is_zero() {
            self.events.push(MarketEvent::PayoutClaimed(PayoutClaimed {
                user,
                outcome,
                payout,
            }));
        }
        Ok(payout)
    }

    // ───────────────────────── Administration ─────────────────────────

    /// Rename the market. Owner-only.
    pub fn set_name(&mut self, caller: UserId, name: impl Into<String>) -> Result<(), MarketError> {
        if caller != self.owner {
            return Err(MarketError::Unauthorized { caller });
        }
        self.name = name.into();
        Ok(())
    }

    /// Hand the matcher role to another identity. Owner-only.
    pub fn set_matcher(&mut self, caller: UserId, matcher: UserId) -> Result<(), MarketError> {
        if caller != self.owner {
            return Err(MarketError::Unauthorized { caller });
        }
        self.matcher = matcher;
        Ok(())
    }

    // ───────────────────────── Read accessors ─────────────────────────

    /// Market name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Immutable owner identity.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Current matcher identity.
    pub fn matcher(&self) -> UserId {
        self.matcher
    }

    /// The market's custody account in the token ledger.
    pub fn escrow_account(&self) -> UserId {
        self.escrow_account
    }

    /// Tokens currently held in custody.
    pub fn escrow_balance(&self) -> TokenAmount {
        self.token.balance_of(&self.escrow_account)
    }

    /// True once the market has resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }

    /// The resolved outcome, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.resolution {
            Resolution::Resolved(outcome) => Some(outcome),
            Resolution::Open => None,
        }
    }

    /// Look up an order by (owner, id).
    pub fn order(&self, owner: &UserId, order_id: OrderId) -> Option<&Order> {
        self.orders.get(owner, order_id)
    }

    /// All of an owner's orders in id order.
    pub fn orders_of(&self, owner: &UserId) -> impl Iterator<Item = &Order> {
        self.orders.orders_of(owner)
    }

    /// A user's share balance in one outcome.
    pub fn position(&self, user: &UserId, outcome: Outcome) -> Quantity {
        self.positions.balance(user, outcome)
    }

    /// A user's full position snapshot.
    pub fn position_of(&self, user: &UserId) -> Position {
        self.positions.position(user)
    }

    /// Total shares outstanding in one outcome across all users.
    pub fn total_outstanding(&self, outcome: Outcome) -> Quantity {
        self.positions.total_outstanding(outcome)
    }

    /// The payment-token collaborator.
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Mutable token access for deposits and approvals in setup flows.
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    /// All emitted events.
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal guards ─────────────────────────

    fn ensure_open(&self) -> Result<(), MarketError> {
        if self.is_resolved() {
            return Err(MarketError::MarketResolved);
        }
        Ok(())
    }

    /// Lookup that also requires PENDING status.
    fn pending_order(&self, owner: &UserId, order_id: OrderId) -> Result<&Order, MarketError> {
        let order = self
            .orders
            .get(owner, order_id)
            .ok_or(MarketError::OrderNotFound {
                owner: *owner,
                order_id,
            })?;
        if !order.is_pending() {
            return Err(MarketError::InvalidOrderState {
                order_id,
                status: order.status,
            });
        }
        Ok(order)
    }
}

/// Unix-nanos wall clock for order timestamps.
fn now() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
