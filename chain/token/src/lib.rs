//! Payment-token collaborator for the prediction market
//!
//! The market core only ever talks to the payment token through the
//! [`PaymentToken`] trait: balance queries, the token's decimal precision,
//! an allowance-gated pull-transfer into custody, and a push-transfer out
//! of custody. [`ledger::TokenLedger`] is the in-memory reference
//! implementation used by tests and local deployments.

pub mod ledger;

pub use ledger::{PaymentToken, TokenLedger};
