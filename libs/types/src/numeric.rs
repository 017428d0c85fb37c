//! Fixed-point numeric types for share quantities, prices, and token amounts
//!
//! All settlement math is exact u128 integer arithmetic: quantities are
//! share base units at a fixed 18-decimal precision, prices are basis
//! points, token amounts are the payment token's own base units.
//! `rust_decimal` is used only at the API edge for parsing and display of
//! human-readable decimal strings.

use crate::errors::MarketError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed decimal precision of share quantities
pub const SHARE_DECIMALS: u32 = 18;

/// Maximum price in basis points, representing 100% probability
pub const PRICE_MAX_BPS: u32 = 10_000;

/// 10^exp as u128
pub fn pow10(exp: u32) -> u128 {
    10u128.pow(exp)
}

/// Limit price in basis points of the outcome probability
///
/// Valid domain is `1..=PRICE_MAX_BPS`; a price of 10_000 bps means
/// certainty. Fixed at order creation, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// The maximum valid price (100%)
    pub const MAX: Price = Price(PRICE_MAX_BPS);

    /// Create a price, validating the basis-point domain
    pub fn try_new(bps: u32) -> Result<Self, MarketError> {
        if bps == 0 || bps > PRICE_MAX_BPS {
            return Err(MarketError::InvalidPrice {
                bps,
                max: PRICE_MAX_BPS,
            });
        }
        Ok(Self(bps))
    }

    /// Create a price from whole percent (1..=100)
    pub fn from_percent(percent: u32) -> Result<Self, MarketError> {
        Self::try_new(percent.saturating_mul(100))
    }

    /// Basis-point value
    pub fn bps(&self) -> u32 {
        self.0
    }

    /// The complementary price: `MAX - self`
    ///
    /// Returns None when self is already the maximum.
    pub fn complement(&self) -> Option<Price> {
        Price::try_new(PRICE_MAX_BPS - self.0).ok()
    }

    /// Positive price difference `self - other`
    ///
    /// Returns None when the difference is zero (a zero price is outside
    /// the valid domain) or negative.
    pub fn checked_sub(&self, other: Price) -> Option<Price> {
        if self.0 <= other.0 {
            return None;
        }
        Some(Price(self.0 - other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

/// Share quantity in base units at [`SHARE_DECIMALS`] precision
///
/// Non-negative by construction; ledger mutations only move through
/// checked arithmetic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u128);

impl Quantity {
    /// Zero shares
    pub const ZERO: Quantity = Quantity(0);

    /// Create from raw base units
    pub fn from_base_units(units: u128) -> Self {
        Self(units)
    }

    /// Create from a whole number of shares
    pub fn from_whole(shares: u64) -> Self {
        Self(shares as u128 * pow10(SHARE_DECIMALS))
    }

    /// Parse a decimal share count such as "1.5"
    ///
    /// Rejects negatives and more than [`SHARE_DECIMALS`] fractional digits.
    pub fn from_decimal_str(s: &str) -> Result<Self, MarketError> {
        let d = Decimal::from_str(s)
            .map_err(|e| MarketError::InvalidQuantity(format!("unparseable quantity: {e}")))?;
        if d.is_sign_negative() {
            return Err(MarketError::InvalidQuantity(
                "quantity must be non-negative".to_string(),
            ));
        }
        let scale = d.scale();
        if scale > SHARE_DECIMALS {
            return Err(MarketError::InvalidQuantity(format!(
                "at most {SHARE_DECIMALS} decimal places supported"
            )));
        }
        let mantissa = d.mantissa() as u128;
        mantissa
            .checked_mul(pow10(SHARE_DECIMALS - scale))
            .map(Self)
            .ok_or(MarketError::Overflow)
    }

    /// Raw base units
    pub fn base_units(&self) -> u128 {
        self.0
    }

    /// True when zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Quantity)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: Quantity) -> Option<Quantity> {
        self.0.checked_sub(other.0).map(Quantity)
    }

    /// The smaller of two quantities
    pub fn min(self, other: Quantity) -> Quantity {
        Quantity(self.0.min(other.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = pow10(SHARE_DECIMALS);
        let whole = self.0 / scale;
        let frac = self.0 % scale;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let frac_str = format!("{frac:0width$}", width = SHARE_DECIMALS as usize);
            write!(f, "{}.{}", whole, frac_str.trim_end_matches('0'))
        }
    }
}

/// Payment-token amount in the token's own base units
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    /// Zero tokens
    pub const ZERO: TokenAmount = TokenAmount(0);

    /// Create from raw base units
    pub fn from_units(units: u128) -> Self {
        Self(units)
    }

    /// Raw base units
    pub fn units(&self) -> u128 {
        self.0
    }

    /// True when zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_add(other.0).map(TokenAmount)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_sub(other.0).map(TokenAmount)
    }

    /// Human-readable decimal value at the given token precision
    ///
    /// Intended for display and reporting only; settlement math never
    /// leaves base units.
    pub fn to_decimal(&self, decimals: u32) -> Decimal {
        Decimal::from_i128_with_scale(self.0 as i128, decimals)
    }
}

// Displays the raw unit count; formatting at token precision needs the
// decimals value and goes through `to_decimal`.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
