//! # Matchbook
//!
//! Deterministic single-symbol limit order book: price-time priority
//! matching at the maker's price, with market, immediate-or-cancel,
//! fill-or-kill, post-only, and stop orders.
//!
//! ## Entry point
//!
//! Use [`Engine`] as the single entry point: create with [`Engine::new`],
//! then [`Engine::add_order`], [`Engine::cancel_order`], and
//! [`Engine::modify_order`]. Depth is observable through
//! [`Engine::level_infos`].
//!
//! ## Example
//!
//! ```rust
//! use matchbook::{Engine, Order, OrderId, OrderType, Side};
//!
//! let mut engine = Engine::new();
//! engine
//!     .add_order(Order::new(OrderType::GoodTillCancel, OrderId(1), Side::Sell, 100, 10))
//!     .unwrap();
//! let trades = engine
//!     .add_order(Order::new(OrderType::GoodTillCancel, OrderId(2), Side::Buy, 105, 10))
//!     .unwrap();
//! assert_eq!(trades.len(), 1);
//! // Both legs execute at the resting order's price.
//! assert_eq!(trades[0].bid.price, 100);
//! assert_eq!(trades[0].ask.price, 100);
//! assert_eq!(engine.size(), 0);
//! ```
//!
//! ## Lower-level API
//!
//! You can also use [`OrderBook`] and [`match_order`] directly if you run
//! admission and stop handling yourself.

pub mod audit;
pub mod engine;
pub mod error;
pub mod execution;
pub mod market_data_gen;
pub mod matching;
pub mod order_book;
pub mod types;

pub use engine::Engine;
pub use error::BookError;
pub use execution::{Trade, TradeInfo, Trades};
pub use matching::match_order;
pub use order_book::{Fill, LevelInfo, LevelInfos, OrderBook};
pub use types::{
    Order, OrderId, OrderModify, OrderType, Price, Quantity, Side, MAX_PRICE, MIN_PRICE,
};
