//! Types library for the prediction market
//!
//! This library provides all core type definitions used across the market
//! system, ensuring type safety and deterministic behavior.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Unique identifiers (UserId, OrderId)
//! - `numeric`: Fixed-point types (Price, Quantity, TokenAmount)
//! - `order`: Order lifecycle types
//! - `position`: Position tracking types
//! - `errors`: Error taxonomy

// Public modules
pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod position;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::position::*;
}
