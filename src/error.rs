//! Error taxonomy for the matching engine.

use thiserror::Error;

use crate::types::{OrderId, Price};

/// Errors raised by order submission and filling.
///
/// `ZeroQuantity` and `NegativePrice` are admission failures that indicate a
/// caller programming error; they are raised before any state mutation.
/// `Overfill` indicates an engine-internal bug and should be treated as
/// unrecoverable.
///
/// Unsatisfiable but well-formed requests (duplicate id, uncrossable
/// immediate-or-cancel, unfulfillable fill-or-kill, crossing post-only,
/// cancel or modify of an unknown id) are reported as empty trades with no
/// state change, not as errors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum BookError {
    #[error("order quantity must be greater than zero")]
    ZeroQuantity,

    #[error("order price must be non-negative, got {0}")]
    NegativePrice(Price),

    #[error("order {0} cannot be filled for more than its remaining quantity")]
    Overfill(OrderId),
}
