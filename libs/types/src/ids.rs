//! Unique identifier types for market entities
//!
//! User identity uses UUID v7 for time-sortable ordering; order ids are
//! plain sequential integers assigned per owner by the order ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a market participant
///
/// Uses UUID v7 for time-based sorting, enabling efficient chronological
/// queries over user-keyed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Create a new UserId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-owner sequential order identifier
///
/// Assigned at order creation starting at 1, monotonically increasing per
/// owner, never reused. An order is addressed by the (owner, id) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// The first id handed out for any owner
    pub const FIRST: OrderId = OrderId(1);

    /// Create from a raw sequence value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw sequence value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one in the owner's sequence
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_creation() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2, "UserIds should be unique");
    }

    #[test]
    fn test_user_id_serialization() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_order_id_sequence() {
        let first = OrderId::FIRST;
        assert_eq!(first.value(), 1);
        assert_eq!(first.next(), OrderId::new(2));
        assert_eq!(first.next().next().value(), 3);
    }

    #[test]
    fn test_order_id_ordering() {
        assert!(OrderId::new(1) < OrderId::new(2));
        assert_eq!(OrderId::new(7), OrderId::new(7));
    }

    #[test]
    fn test_order_id_display() {
        assert_eq!(OrderId::new(42).to_string(), "#42");
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::new(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");
        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
