//! Per-user order storage with sequential id assignment
//!
//! Orders are keyed by (owner, id); ids are assigned per owner starting at
//! 1 and are never reused. Lookup of an absent order returns None rather
//! than a sentinel value.

use std::collections::{BTreeMap, HashMap};
use types::ids::{OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Outcome, Side};

/// Owns all orders and the per-owner id counters.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: HashMap<UserId, BTreeMap<OrderId, Order>>,
    next_ids: HashMap<UserId, OrderId>,
}

impl OrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pending order for `owner`, assigning the next
    /// sequential id for that owner.
    pub fn insert(
        &mut self,
        owner: UserId,
        side: Side,
        outcome: Outcome,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> OrderId {
        let id = *self.next_ids.entry(owner).or_insert(OrderId::FIRST);
        self.next_ids.insert(owner, id.next());

        let order = Order::new(id, owner, side, outcome, price, quantity, timestamp);
        self.orders.entry(owner).or_default().insert(id, order);
        id
    }

    /// Look up an order by (owner, id).
    pub fn get(&self, owner: &UserId, id: OrderId) -> Option<&Order> {
        self.orders.get(owner).and_then(|book| book.get(&id))
    }

    /// Mutable lookup by (owner, id).
    pub fn get_mut(&mut self, owner: &UserId, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(owner).and_then(|book| book.get_mut(&id))
    }

    /// All of an owner's orders in id order.
    pub fn orders_of(&self, owner: &UserId) -> impl Iterator<Item = &Order> {
        self.orders.get(owner).into_iter().flat_map(|book| book.values())
    }

    /// Total number of orders across all owners.
    pub fn len(&self) -> usize {
        self.orders.values().map(|book| book.len()).sum()
    }

    /// True when no orders have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
