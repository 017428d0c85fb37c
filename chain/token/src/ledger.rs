//! In-memory payment-token ledger
//!
//! Balance tracking by account with overflow-checked arithmetic, an
//! ERC20-style allowance table gating pull-transfers, and a fixed decimal
//! precision captured at construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::errors::TokenError;
use types::ids::UserId;
use types::numeric::TokenAmount;

/// External payment-token account surface required by the market core.
///
/// The market queries `decimals` once at construction and caches it;
/// `pull` moves funds from a user into custody and fails without a prior
/// allowance; `transfer` moves funds out of the caller-controlled custody
/// account.
pub trait PaymentToken {
    /// Decimal precision of token amounts (immutable)
    fn decimals(&self) -> u32;

    /// Balance of an account; missing accounts read as zero
    fn balance_of(&self, account: &UserId) -> TokenAmount;

    /// Allowance-gated pull-transfer: moves `amount` from `from` to `to`,
    /// spending `to`'s allowance on `from`'s funds
    fn pull(&mut self, from: &UserId, to: &UserId, amount: TokenAmount) -> Result<(), TokenError>;

    /// Direct transfer from an account the caller controls
    fn transfer(
        &mut self,
        from: &UserId,
        to: &UserId,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;
}

/// In-memory reference implementation of [`PaymentToken`].
///
/// Balances are stored as `HashMap<UserId, TokenAmount>`; allowances as a
/// nested owner -> spender -> amount map. All balance math is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLedger {
    symbol: String,
    decimals: u32,
    total_supply: TokenAmount,
    balances: HashMap<UserId, TokenAmount>,
    /// owner -> (spender -> approved amount)
    allowances: HashMap<UserId, HashMap<UserId, TokenAmount>>,
}

impl TokenLedger {
    /// Create an empty ledger with a fixed decimal precision.
    pub fn new(symbol: impl Into<String>, decimals: u32) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            total_supply: TokenAmount::ZERO,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Token symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Total minted supply.
    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    /// Mint new tokens into an account.
    pub fn mint(&mut self, account: UserId, amount: TokenAmount) -> Result<(), TokenError> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.credit(account, amount)
    }

    /// Approve `spender` to pull up to `amount` from `owner`.
    ///
    /// Overwrites any previous approval for the pair.
    pub fn approve(&mut self, owner: UserId, spender: UserId, amount: TokenAmount) {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
    }

    /// Remaining allowance for the (owner, spender) pair.
    pub fn allowance(&self, owner: &UserId, spender: &UserId) -> TokenAmount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Credit with overflow protection.
    fn credit(&mut self, account: UserId, amount: TokenAmount) -> Result<(), TokenError> {
        let current = self.balances.entry(account).or_insert(TokenAmount::ZERO);
        *current = current.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Debit with balance check.
    fn debit(&mut self, account: &UserId, amount: TokenAmount) -> Result<(), TokenError> {
        let available = self.balance_of(account);
        let remaining = available
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                required: amount,
                available,
            })?;
        self.balances.insert(*account, remaining);
        Ok(())
    }
}

impl PaymentToken for TokenLedger {
    fn decimals(&self) -> u32 {
        self.decimals
    }

    fn balance_of(&self, account: &UserId) -> TokenAmount {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    fn pull(&mut self, from: &UserId, to: &UserId, amount: TokenAmount) -> Result<(), TokenError> {
        let approved = self.allowance(from, to);
        let remaining =
            approved
                .checked_sub(amount)
                .ok_or(TokenError::InsufficientAllowance {
                    spender: *to,
                    required: amount,
                    approved,
                })?;

        // Balance check happens before any mutation
        self.debit(from, amount)?;
        self.allowances
            .entry(*from)
            .or_default()
            .insert(*to, remaining);
        self.credit(*to, amount)
    }

    fn transfer(
        &mut self,
        from: &UserId,
        to: &UserId,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        self.debit(from, amount)?;
        self.credit(*to, amount)
    }
}
