//! Error taxonomy for the prediction market
//!
//! Every error is detected by pre-mutation validation; no operation leaves
//! partial state behind. Comprehensive taxonomy using thiserror.

use crate::ids::{OrderId, UserId};
use crate::numeric::{Quantity, TokenAmount};
use crate::order::{Outcome, OrderStatus};
use thiserror::Error;

/// Payment-token account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        required: TokenAmount,
        available: TokenAmount,
    },

    #[error("insufficient allowance for spender {spender}: required {required}, approved {approved}")]
    InsufficientAllowance {
        spender: UserId,
        required: TokenAmount,
        approved: TokenAmount,
    },

    #[error("arithmetic overflow in balance calculation")]
    Overflow,
}

/// Market-level errors covering order placement, matching, and lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("invalid price: {bps} bps outside 1..={max}")]
    InvalidPrice { bps: u32, max: u32 },

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: TokenAmount,
        available: TokenAmount,
    },

    #[error("insufficient {outcome} shares: required {required}, held {held}")]
    InsufficientShares {
        outcome: Outcome,
        required: Quantity,
        held: Quantity,
    },

    #[error("order {order_id} not found for user {owner}")]
    OrderNotFound { owner: UserId, order_id: OrderId },

    #[error("order {order_id} is {status}, expected PENDING")]
    InvalidOrderState {
        order_id: OrderId,
        status: OrderStatus,
    },

    #[error("incompatible orders: {0}")]
    IncompatibleOrders(String),

    #[error("price mismatch: {0}")]
    PriceMismatch(String),

    #[error("order pair matches no rule (sides {side1}/{side2})")]
    InvalidOrderPair { side1: String, side2: String },

    #[error("cannot match a user's orders against each other")]
    SelfMatch,

    #[error("unauthorized: caller {caller} lacks the required role")]
    Unauthorized { caller: UserId },

    #[error("market already resolved")]
    MarketResolved,

    #[error("market already resolved; cannot resolve again")]
    AlreadyResolved,

    #[error("market not resolved yet")]
    NotResolved,

    #[error("arithmetic overflow in unit conversion")]
    Overflow,

    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_price_display() {
        let err = MarketError::InvalidPrice { bps: 0, max: 10_000 };
        assert_eq!(err.to_string(), "invalid price: 0 bps outside 1..=10000");
    }

    #[test]
    fn test_insufficient_funds_display() {
        let err = MarketError::InsufficientFunds {
            required: TokenAmount::from_units(150),
            available: TokenAmount::from_units(100),
        };
        assert!(err.to_string().contains("150"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_insufficient_shares_display() {
        let err = MarketError::InsufficientShares {
            outcome: Outcome::YES,
            required: Quantity::from_whole(60),
            held: Quantity::from_whole(10),
        };
        assert!(err.to_string().contains("YES"));
        assert!(err.to_string().contains("60"));
    }

    #[test]
    fn test_market_error_from_token_error() {
        let token_err = TokenError::Overflow;
        let market_err: MarketError = token_err.into();
        assert!(matches!(market_err, MarketError::Token(_)));
    }

    #[test]
    fn test_order_state_display() {
        let err = MarketError::InvalidOrderState {
            order_id: OrderId::new(3),
            status: OrderStatus::Cancelled,
        };
        assert!(err.to_string().contains("#3"));
        assert!(err.to_string().contains("CANCELLED"));
    }
}
