//! Market core for a binary-outcome prediction market
//!
//! Users place resting limit orders to buy or sell YES/NO shares, an
//! authorized matcher pairs compatible orders by explicit order id, and
//! after resolution winning shares redeem 1:1 in payment tokens.
//!
//! # Modules
//! - `conversion`: exact integer unit conversion between share quantities,
//!   basis-point prices, and payment-token amounts
//! - `orders`: per-user order storage with sequential id assignment
//! - `positions`: per-user, per-outcome share balances
//! - `matching`: pair classification and compatibility checks
//! - `market`: the `Market` state machine tying everything together
//! - `events`: append-only market event log
//!
//! The `Market` type is a strictly sequential state machine: every
//! mutating operation takes `&mut self` and validates completely before
//! touching state, so any failure leaves the market untouched.

pub mod conversion;
pub mod events;
pub mod market;
pub mod matching;
pub mod orders;
pub mod positions;

pub use market::{Market, MatchReport};
pub use matching::MatchKind;
