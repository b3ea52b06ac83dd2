//! Single-symbol order book: bids and asks, price-time priority.
//!
//! Each price level is a FIFO queue; best bid is the highest price, best ask
//! the lowest. The book owns its resting orders and the pending stop set.
//! Matching lives in [`crate::matching`]; the book exposes liquidity taking
//! and cross queries for it.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::BookError;
use crate::types::{Order, OrderId, Price, Quantity, Side};

/// Price level -> FIFO queue of resting orders.
type SideBook = BTreeMap<Price, VecDeque<Order>>;

/// Aggregated resting quantity at one price level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

/// Depth snapshot: both sides aggregated by level, best-first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfos {
    pub bids: Vec<LevelInfo>,
    pub asks: Vec<LevelInfo>,
}

/// Result of taking liquidity from the book (one per resting order filled).
#[derive(Clone, Copy, Debug)]
pub struct Fill {
    pub resting_order_id: OrderId,
    /// The resting order's level price; trades execute at this price.
    pub price: Price,
    pub quantity: Quantity,
    /// True if the resting order was fully filled and removed from the book.
    pub resting_fully_filled: bool,
}

/// Single-symbol order book.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: SideBook,
    asks: SideBook,
    /// Resting orders by id: (side, price) locates the level; the position
    /// within the level is recovered by scanning it.
    ids: HashMap<OrderId, (Side, Price)>,
    /// Stop orders parked until a trade price crosses their trigger.
    pending_stops: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resting orders. Pending stops are not counted.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn pending_stop_count(&self) -> usize {
        self.pending_stops.len()
    }

    /// Whether `id` is resting in the book.
    pub fn contains(&self, id: OrderId) -> bool {
        self.ids.contains_key(&id)
    }

    /// Whether `id` is parked as a pending stop.
    pub fn has_pending_stop(&self, id: OrderId) -> bool {
        self.pending_stops.iter().any(|o| o.id() == id)
    }

    /// Read-only handle to a resting order.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        let &(side, price) = self.ids.get(&id)?;
        let level = match side {
            Side::Buy => self.bids.get(&price),
            Side::Sell => self.asks.get(&price),
        }?;
        level.iter().find(|o| o.id() == id)
    }

    /// Appends a resting order at the tail of its price level.
    pub fn insert_resting(&mut self, order: Order) {
        let (id, side, price) = (order.id(), order.side(), order.price());
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book.entry(price).or_default().push_back(order);
        self.ids.insert(id, (side, price));
    }

    /// Parks a stop order until a trade price triggers it.
    pub fn park_stop(&mut self, order: Order) {
        self.pending_stops.push(order);
    }

    /// Removes a resting order by id. Returns true if found and removed.
    pub fn remove(&mut self, id: OrderId) -> bool {
        let Some((side, price)) = self.ids.remove(&id) else {
            return false;
        };
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(queue) = book.get_mut(&price) {
            queue.retain(|o| o.id() != id);
            if queue.is_empty() {
                book.remove(&price);
            }
        }
        true
    }

    /// Removes a pending stop by id. Returns true if found and removed.
    pub fn remove_pending_stop(&mut self, id: OrderId) -> bool {
        let before = self.pending_stops.len();
        self.pending_stops.retain(|o| o.id() != id);
        self.pending_stops.len() != before
    }

    /// Best bid price (None if empty).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Best ask price (None if empty).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// True iff an order on `side` at `price` crosses the opposing best level.
    pub fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.best_ask().map_or(false, |ask| price >= ask),
            Side::Sell => self.best_bid().map_or(false, |bid| price <= bid),
        }
    }

    /// True iff crossable opposing liquidity sums to at least `quantity`.
    /// Walks the opposing side best-first and returns early once the target
    /// is reached. Accumulates in u64 so a deep book cannot overflow the
    /// quantity domain mid-sum.
    pub fn can_fully_match(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        if !self.can_match(side, price) {
            return false;
        }
        let target = u64::from(quantity);
        let mut available: u64 = 0;
        match side {
            Side::Buy => {
                for (&level_price, queue) in self.asks.iter() {
                    if price < level_price {
                        break;
                    }
                    for order in queue {
                        available += u64::from(order.remaining_quantity());
                        if available >= target {
                            return true;
                        }
                    }
                }
            }
            Side::Sell => {
                // BTreeMap: iterate bids in descending price (best bid first).
                for (&level_price, queue) in self.bids.iter().rev() {
                    if price > level_price {
                        break;
                    }
                    for order in queue {
                        available += u64::from(order.remaining_quantity());
                        if available >= target {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Takes liquidity from the ask side for an incoming buy: best price
    /// first, FIFO within a level, at most `quantity` in total and only
    /// from levels at or below `price_limit`. Resting orders are filled in
    /// place; fully filled ones are removed from their level and the index,
    /// and emptied levels are dropped.
    pub fn take_from_asks(
        &mut self,
        price_limit: Price,
        quantity: Quantity,
    ) -> Result<Vec<Fill>, BookError> {
        let mut fills = Vec::new();
        let mut remaining = quantity;
        while remaining > 0 {
            let Some(best) = self.best_ask() else { break };
            if price_limit < best {
                break;
            }
            let Some(queue) = self.asks.get_mut(&best) else { break };
            while remaining > 0 {
                let Some(front) = queue.front_mut() else { break };
                let fill_quantity = remaining.min(front.remaining_quantity());
                front.fill(fill_quantity)?;
                remaining -= fill_quantity;
                let fully = front.is_filled();
                fills.push(Fill {
                    resting_order_id: front.id(),
                    price: best,
                    quantity: fill_quantity,
                    resting_fully_filled: fully,
                });
                if fully {
                    let id = front.id();
                    queue.pop_front();
                    self.ids.remove(&id);
                }
            }
            if queue.is_empty() {
                self.asks.remove(&best);
            }
        }
        Ok(fills)
    }

    /// Takes liquidity from the bid side for an incoming sell: mirror of
    /// [`OrderBook::take_from_asks`], walking levels at or above
    /// `price_limit` from the highest down.
    pub fn take_from_bids(
        &mut self,
        price_limit: Price,
        quantity: Quantity,
    ) -> Result<Vec<Fill>, BookError> {
        let mut fills = Vec::new();
        let mut remaining = quantity;
        while remaining > 0 {
            let Some(best) = self.best_bid() else { break };
            if price_limit > best {
                break;
            }
            let Some(queue) = self.bids.get_mut(&best) else { break };
            while remaining > 0 {
                let Some(front) = queue.front_mut() else { break };
                let fill_quantity = remaining.min(front.remaining_quantity());
                front.fill(fill_quantity)?;
                remaining -= fill_quantity;
                let fully = front.is_filled();
                fills.push(Fill {
                    resting_order_id: front.id(),
                    price: best,
                    quantity: fill_quantity,
                    resting_fully_filled: fully,
                });
                if fully {
                    let id = front.id();
                    queue.pop_front();
                    self.ids.remove(&id);
                }
            }
            if queue.is_empty() {
                self.bids.remove(&best);
            }
        }
        Ok(fills)
    }

    /// Removes and returns every pending stop triggered by `trade_price`,
    /// preserving the order they were parked in. Buy stops trigger at or
    /// above their stop price, sell stops at or below.
    pub fn take_triggered_stops(&mut self, trade_price: Price) -> Vec<Order> {
        let mut triggered = Vec::new();
        let mut kept = Vec::with_capacity(self.pending_stops.len());
        for order in self.pending_stops.drain(..) {
            let hit = match (order.stop_price(), order.side()) {
                (Some(stop), Side::Buy) => trade_price >= stop,
                (Some(stop), Side::Sell) => trade_price <= stop,
                (None, _) => false,
            };
            if hit {
                triggered.push(order);
            } else {
                kept.push(order);
            }
        }
        self.pending_stops = kept;
        triggered
    }

    /// Aggregated depth snapshot, best-first on both sides.
    pub fn level_infos(&self) -> LevelInfos {
        fn aggregate(queue: &VecDeque<Order>) -> Quantity {
            queue.iter().map(|o| o.remaining_quantity()).sum()
        }
        LevelInfos {
            bids: self
                .bids
                .iter()
                .rev()
                .map(|(&price, queue)| LevelInfo {
                    price,
                    quantity: aggregate(queue),
                })
                .collect(),
            asks: self
                .asks
                .iter()
                .map(|(&price, queue)| LevelInfo {
                    price,
                    quantity: aggregate(queue),
                })
                .collect(),
        }
    }
}
