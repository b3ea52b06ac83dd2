//! Price-time priority matching.
//!
//! [`match_order`] runs one aggressive order against the book: takes
//! liquidity from the opposing side and emits one [`Trade`] per resting
//! order filled, priced at the maker's level.

use crate::error::BookError;
use crate::execution::{Trade, TradeInfo, Trades};
use crate::order_book::OrderBook;
use crate::types::{Order, Side};

/// Matches `order` against the opposing side of `book`.
///
/// Walks opposing levels best-first while the order's (normalized) price
/// crosses, filling FIFO within each level. Both trade legs carry the
/// resting order's price and the fill quantity; the Buy-side order is
/// always the bid leg. The aggressive order's remaining quantity is reduced
/// by the total filled.
pub fn match_order(book: &mut OrderBook, order: &mut Order) -> Result<Trades, BookError> {
    let fills = match order.side() {
        Side::Buy => book.take_from_asks(order.price(), order.remaining_quantity())?,
        Side::Sell => book.take_from_bids(order.price(), order.remaining_quantity())?,
    };

    let mut trades = Trades::with_capacity(fills.len());
    for fill in fills {
        order.fill(fill.quantity)?;
        let aggressive = TradeInfo {
            order_id: order.id(),
            price: fill.price,
            quantity: fill.quantity,
        };
        let resting = TradeInfo {
            order_id: fill.resting_order_id,
            price: fill.price,
            quantity: fill.quantity,
        };
        trades.push(match order.side() {
            Side::Buy => Trade {
                bid: aggressive,
                ask: resting,
            },
            Side::Sell => Trade {
                bid: resting,
                ask: aggressive,
            },
        });
    }
    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderId, OrderType, Price, Quantity};

    fn gtc(id: u64, side: Side, price: Price, quantity: Quantity) -> Order {
        Order::new(OrderType::GoodTillCancel, OrderId(id), side, price, quantity)
    }

    #[test]
    fn full_match_empties_both_sides() {
        let mut book = OrderBook::new();
        book.insert_resting(gtc(1, Side::Sell, 100, 10));
        let mut buy = gtc(2, Side::Buy, 100, 10);
        let trades = match_order(&mut book, &mut buy).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid.order_id, OrderId(2));
        assert_eq!(trades[0].ask.order_id, OrderId(1));
        assert_eq!(trades[0].bid.quantity, 10);
        assert!(buy.is_filled());
        assert!(book.is_empty());
    }

    #[test]
    fn no_cross_no_trades() {
        let mut book = OrderBook::new();
        book.insert_resting(gtc(1, Side::Sell, 105, 10));
        let mut buy = gtc(2, Side::Buy, 95, 10);
        let trades = match_order(&mut book, &mut buy).unwrap();
        assert!(trades.is_empty());
        assert_eq!(buy.remaining_quantity(), 10);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn partial_fill_leaves_aggressive_residual() {
        let mut book = OrderBook::new();
        book.insert_resting(gtc(1, Side::Sell, 100, 5));
        let mut buy = gtc(2, Side::Buy, 100, 10);
        let trades = match_order(&mut book, &mut buy).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].ask.quantity, 5);
        assert_eq!(buy.remaining_quantity(), 5);
        assert!(book.is_empty());
    }

    #[test]
    fn walks_levels_best_first_at_maker_price() {
        let mut book = OrderBook::new();
        book.insert_resting(gtc(1, Side::Sell, 100, 10));
        book.insert_resting(gtc(2, Side::Sell, 101, 20));
        book.insert_resting(gtc(3, Side::Sell, 102, 30));
        let mut buy = gtc(4, Side::Buy, 105, 50);
        let trades = match_order(&mut book, &mut buy).unwrap();
        assert_eq!(trades.len(), 3);
        assert_eq!(trades[0].ask.price, 100);
        assert_eq!(trades[0].ask.quantity, 10);
        assert_eq!(trades[1].ask.price, 101);
        assert_eq!(trades[1].ask.quantity, 20);
        assert_eq!(trades[2].ask.price, 102);
        assert_eq!(trades[2].ask.quantity, 20);
        assert!(buy.is_filled());
        assert_eq!(book.len(), 1, "partially filled maker stays");
    }

    #[test]
    fn sell_aggressor_legs_are_swapped() {
        let mut book = OrderBook::new();
        book.insert_resting(gtc(1, Side::Buy, 100, 10));
        let mut sell = gtc(2, Side::Sell, 100, 10);
        let trades = match_order(&mut book, &mut sell).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid.order_id, OrderId(1));
        assert_eq!(trades[0].ask.order_id, OrderId(2));
        assert_eq!(trades[0].bid.price, 100);
    }

    #[test]
    fn fifo_within_level() {
        let mut book = OrderBook::new();
        book.insert_resting(gtc(1, Side::Sell, 100, 5));
        book.insert_resting(gtc(2, Side::Sell, 100, 5));
        let mut buy = gtc(3, Side::Buy, 100, 5);
        let trades = match_order(&mut book, &mut buy).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].ask.order_id, OrderId(1), "earliest arrival trades first");
    }
}
