//! # models
//!
//! Internal data model: the strictly-typed shapes the rest of the system
//! works with, regardless of how loosely the broker reports them.

pub mod account;
pub mod instrument;
pub mod order;
pub mod position;

pub use account::Account;
pub use instrument::Instrument;
pub use order::{Order, OrderType, Side};
pub use position::{Position, PositionSide};
