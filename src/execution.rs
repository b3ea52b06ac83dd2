//! Trade records.
//!
//! [`Trade`] is emitted for each match between a buy and a sell. Both legs
//! carry the same quantity and the same price: the maker's price, i.e. the
//! resting order's limit.

use serde::{Deserialize, Serialize};

use crate::types::{OrderId, Price, Quantity};

/// One side of a trade: which order traded, at what price, for how much.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

/// A single fill between a bid and an ask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub bid: TradeInfo,
    pub ask: TradeInfo,
}

/// Trades in the order the matching loop generated them.
pub type Trades = Vec<Trade>;
