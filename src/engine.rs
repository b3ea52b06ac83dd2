//! Single-entry matching engine facade.
//!
//! [`Engine`] owns the [`OrderBook`] and runs the full order lifecycle for
//! each submission: validation, type-specific admission, matching, stop
//! triggering, and resting of the residual.

use log::{debug, warn};

use crate::error::BookError;
use crate::execution::Trades;
use crate::matching::match_order;
use crate::order_book::{LevelInfos, OrderBook};
use crate::types::{Order, OrderId, OrderModify, OrderType, Price, MIN_PRICE};

/// Single-symbol matching engine.
///
/// Use [`Engine::add_order`] to submit orders; the engine runs admission and
/// matching and returns the resulting trades. Use [`Engine::cancel_order`]
/// and [`Engine::modify_order`] to change resting orders. All operations are
/// synchronous and serial; the engine owns its orders and hands out
/// read-only views only.
#[derive(Debug, Default)]
pub struct Engine {
    book: OrderBook,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
        }
    }

    /// Submits an order and returns the trades it generated, in the order
    /// the matching loop produced them (best price first, FIFO within a
    /// price).
    ///
    /// Fails with [`BookError::ZeroQuantity`] or [`BookError::NegativePrice`]
    /// before any state change. Unsatisfiable requests return empty trades
    /// with no state change: a duplicate id, a FillAndKill that cannot
    /// cross, a FillOrKill the book cannot fully satisfy, or a PostOnly
    /// that would cross. Stop orders are parked and return empty trades.
    ///
    /// Residuals rest for GoodTillCancel and PostOnly; Market and
    /// FillAndKill residuals are discarded. Trades generated by stop orders
    /// this submission triggered are not included in the return value.
    pub fn add_order(&mut self, mut order: Order) -> Result<Trades, BookError> {
        if order.initial_quantity() == 0 {
            warn!("rejecting order {}: zero quantity", order.id());
            return Err(BookError::ZeroQuantity);
        }
        if order.price() < MIN_PRICE {
            warn!("rejecting order {}: negative price {}", order.id(), order.price());
            return Err(BookError::NegativePrice(order.price()));
        }

        // One home per id: live resting orders and parked stops both block reuse.
        if self.book.contains(order.id()) || self.book.has_pending_stop(order.id()) {
            debug!("ignoring duplicate order id {}", order.id());
            return Ok(Trades::new());
        }

        match order.order_type() {
            OrderType::FillAndKill if !self.book.can_match(order.side(), order.price()) => {
                return Ok(Trades::new());
            }
            OrderType::FillOrKill
                if !self
                    .book
                    .can_fully_match(order.side(), order.price(), order.remaining_quantity()) =>
            {
                return Ok(Trades::new());
            }
            OrderType::PostOnly if self.book.can_match(order.side(), order.price()) => {
                return Ok(Trades::new());
            }
            _ => {}
        }

        if order.is_stop() {
            debug!("parking stop order {}", order.id());
            self.book.park_stop(order);
            return Ok(Trades::new());
        }

        let trades = match_order(&mut self.book, &mut order)?;

        if let Some(last) = trades.last() {
            self.trigger_stops(last.ask.price)?;
        }

        if !order.is_filled()
            && matches!(
                order.order_type(),
                OrderType::GoodTillCancel | OrderType::PostOnly
            )
        {
            self.book.insert_resting(order);
        }

        Ok(trades)
    }

    /// Cancels an order by id: resting orders first, then pending stops.
    /// Unknown ids are a silent no-op; cancellation is idempotent.
    pub fn cancel_order(&mut self, id: OrderId) {
        if self.book.remove(id) {
            debug!("cancelled resting order {id}");
        } else if self.book.remove_pending_stop(id) {
            debug!("cancelled pending stop order {id}");
        }
    }

    /// Modifies a resting order as cancel-then-replace and returns the
    /// trades the replacement generated. The replacement keeps the
    /// original's order type but loses time priority at its price level.
    /// Unknown ids (including pending stops) return empty trades.
    pub fn modify_order(&mut self, modify: OrderModify) -> Result<Trades, BookError> {
        let Some(order_type) = self.book.get(modify.order_id()).map(|o| o.order_type()) else {
            return Ok(Trades::new());
        };
        self.cancel_order(modify.order_id());
        self.add_order(modify.to_order(order_type))
    }

    /// Number of resting orders. Pending stops are not counted.
    pub fn size(&self) -> usize {
        self.book.len()
    }

    /// Number of stop orders awaiting their trigger.
    pub fn pending_stop_count(&self) -> usize {
        self.book.pending_stop_count()
    }

    /// Aggregated depth snapshot, best-first on both sides.
    pub fn level_infos(&self) -> LevelInfos {
        self.book.level_infos()
    }

    /// Best bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.book.best_bid()
    }

    /// Best ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.book.best_ask()
    }

    /// Read-only handle to a resting order.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.book.get(id)
    }

    /// Re-injects every stop triggered by `trade_price` as an aggressive
    /// immediate-or-cancel order at its stop price, through the normal
    /// [`Engine::add_order`] path so a triggered stop's own fills can
    /// trigger further stops. Each round removes the triggered stops from
    /// the pending set before resubmission, so cascades terminate.
    fn trigger_stops(&mut self, trade_price: Price) -> Result<(), BookError> {
        for stop in self.book.take_triggered_stops(trade_price) {
            let Some(stop_price) = stop.stop_price() else { continue };
            debug!("stop order {} triggered by trade at {trade_price}", stop.id());
            let aggressive = Order::new(
                OrderType::FillAndKill,
                stop.id(),
                stop.side(),
                stop_price,
                stop.initial_quantity(),
            );
            self.add_order(aggressive)?;
        }
        Ok(())
    }
}
