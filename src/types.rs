//! Core types for the order book.
//!
//! [`Order`] is the mutable entity the engine owns while an order rests in
//! the book; [`OrderModify`] is the immutable cancel-and-replace request.
//! Prices are integer ticks, quantities whole units.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BookError;

/// Price in ticks. Signed so admission can reject negative client input.
pub type Price = i32;

/// Order quantity in whole units.
pub type Quantity = u32;

/// Lowest representable price. Market sells are normalized to this so they
/// cross every bid level.
pub const MIN_PRICE: Price = 0;

/// Highest representable price. Market buys are normalized to this so they
/// cross every ask level.
pub const MAX_PRICE: Price = Price::MAX;

/// Unique order identifier. Uniqueness is the caller's responsibility;
/// submissions reusing a live id are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side this order trades against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type: how the order is admitted and whether a residual rests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Execute at any available price; the residual never rests.
    Market,
    /// Rest in the book until filled or cancelled.
    GoodTillCancel,
    /// Immediate-or-cancel: fill what crosses now, discard the rest.
    FillAndKill,
    /// All-or-nothing: fill the full quantity immediately or do nothing.
    FillOrKill,
    /// Maker-only: rest only if no part would cross.
    PostOnly,
    /// Dormant until the last trade price crosses the stop price, then
    /// re-enters as an aggressive immediate-or-cancel order.
    StopOrder,
}

/// A single resting or aggressive order.
///
/// The engine takes ownership on submission and exposes read-only handles;
/// `remaining_quantity` only ever decreases, via [`Order::fill`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    order_type: OrderType,
    side: Side,
    price: Price,
    stop_price: Option<Price>,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Builds an order. Market orders have their price normalized to the
    /// side's extreme so cross checks succeed against any opposing level;
    /// the normalized price never appears in trades because fills price at
    /// the maker's level.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        let price = match (order_type, side) {
            (OrderType::Market, Side::Buy) => MAX_PRICE,
            (OrderType::Market, Side::Sell) => MIN_PRICE,
            _ => price,
        };
        Self {
            id,
            order_type,
            side,
            price,
            stop_price: None,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Builds a stop order that is parked until the last trade price reaches
    /// `stop_price` (at or above for buys, at or below for sells).
    pub fn new_stop(id: OrderId, side: Side, stop_price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            order_type: OrderType::StopOrder,
            side,
            price: stop_price,
            stop_price: Some(stop_price),
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn stop_price(&self) -> Option<Price> {
        self.stop_price
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    pub fn is_stop(&self) -> bool {
        self.stop_price.is_some()
    }

    /// Reduces the remaining quantity by `quantity`.
    ///
    /// Overfilling is an engine-internal bug, reported as
    /// [`BookError::Overfill`].
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), BookError> {
        if quantity > self.remaining_quantity {
            return Err(BookError::Overfill(self.id));
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }
}

/// Request to modify a resting order, implemented as cancel-and-replace.
/// The replacement loses time priority at its price level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModify {
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Builds the replacement order, keeping the original's type.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(order_type, self.order_id, self.side, self.price, self.quantity)
    }
}
