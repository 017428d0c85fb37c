//! Unit conversion between share quantities, prices, and token amounts
//!
//! Shares carry a fixed 18-decimal precision while the payment token has
//! its own precision, queried once at market construction. All conversion
//! is exact u128 integer arithmetic, multiplying before dividing so no
//! precision is lost ahead of the final division.
//!
//! Buy placement goes through [`share_cost_exact`]: an order whose cost
//! does not convert to a whole number of token units is rejected, so every
//! escrowed order carries its full redemption backing. Settlement and
//! refund paths use the truncating [`share_cost`]; with exact placement
//! costs, truncation on partial fills can only leave sub-unit value behind
//! in custody, never pay out more than was escrowed.

use types::errors::MarketError;
use types::numeric::{pow10, Price, Quantity, TokenAmount, PRICE_MAX_BPS, SHARE_DECIMALS};

/// Quotient and remainder of `quantity × price / PRICE_MAX`, rescaled
/// from share decimals to the token's decimals. The multiplication happens
/// first; the divisor folds the price scale and any rescaling into a
/// single division.
fn cost_parts(
    quantity: Quantity,
    price: Price,
    token_decimals: u32,
) -> Result<(u128, u128), MarketError> {
    if quantity.is_zero() {
        return Err(MarketError::InvalidQuantity(
            "cannot price a zero quantity".to_string(),
        ));
    }

    let numerator = quantity
        .base_units()
        .checked_mul(price.bps() as u128)
        .ok_or(MarketError::Overflow)?;

    let (numerator, divisor) = if SHARE_DECIMALS >= token_decimals {
        let divisor = (PRICE_MAX_BPS as u128)
            .checked_mul(pow10(SHARE_DECIMALS - token_decimals))
            .ok_or(MarketError::Overflow)?;
        (numerator, divisor)
    } else {
        let scaled = numerator
            .checked_mul(pow10(token_decimals - SHARE_DECIMALS))
            .ok_or(MarketError::Overflow)?;
        (scaled, PRICE_MAX_BPS as u128)
    };

    Ok((numerator / divisor, numerator % divisor))
}

/// Payment-token cost of `quantity` shares at `price`, truncated toward
/// zero. Settlement-side conversion.
pub fn share_cost(
    quantity: Quantity,
    price: Price,
    token_decimals: u32,
) -> Result<TokenAmount, MarketError> {
    let (units, _) = cost_parts(quantity, price, token_decimals)?;
    Ok(TokenAmount::from_units(units))
}

/// Payment-token cost of `quantity` shares at `price`, rejecting any
/// quantity whose cost is not a whole number of token units.
///
/// Placement-side conversion: an under-escrowed buy could mint shares
/// whose redemption exceeds the tokens actually collected.
pub fn share_cost_exact(
    quantity: Quantity,
    price: Price,
    token_decimals: u32,
) -> Result<TokenAmount, MarketError> {
    let (units, remainder) = cost_parts(quantity, price, token_decimals)?;
    if remainder != 0 {
        return Err(MarketError::InvalidQuantity(format!(
            "cost of {quantity} shares at {price} is not a whole number of token units"
        )));
    }
    Ok(TokenAmount::from_units(units))
}

/// Token value of winning shares at resolution: 1:1 redemption (100%).
pub fn redemption_value(
    quantity: Quantity,
    token_decimals: u32,
) -> Result<TokenAmount, MarketError> {
    share_cost(quantity, Price::MAX, token_decimals)
}
