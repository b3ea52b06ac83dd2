//! Demo: replay a synthetic order stream and print the resulting book.
//!
//! Emits one audit line per submission and a depth snapshot at the end.

use log::info;
use matchbook::audit::{AuditEvent, AuditSink, StdoutAuditSink};
use matchbook::market_data_gen::{Generator, GeneratorConfig};
use matchbook::Engine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GeneratorConfig {
        seed: 7,
        num_orders: 1_000,
        ..Default::default()
    };
    let mut engine = Engine::new();
    let audit = StdoutAuditSink;

    let mut total_trades = 0usize;
    for order in Generator::new(config).all_orders() {
        let id = order.id();
        match engine.add_order(order) {
            Ok(trades) => {
                audit.emit(&AuditEvent::now(
                    "order_submit",
                    Some(serde_json::json!({ "order_id": id.0, "trades": trades.len() })),
                    "accepted",
                ));
                total_trades += trades.len();
            }
            Err(e) => {
                audit.emit(&AuditEvent::now(
                    "order_submit",
                    Some(serde_json::json!({ "order_id": id.0 })),
                    format!("error: {e}"),
                ));
            }
        }
    }

    info!(
        "replay done: {} trades, {} resting orders, {} pending stops",
        total_trades,
        engine.size(),
        engine.pending_stop_count()
    );
    let depth = engine.level_infos();
    println!(
        "{}",
        serde_json::to_string_pretty(&depth).expect("serialize depth snapshot")
    );
}
