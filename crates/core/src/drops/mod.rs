//! Drops
//!
//! Read-only display logic over drop records: which phase a drop is in, how long until the
//! next phase change, and how much stock is left.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::DropId;

mod countdown;
mod state;
mod stock;

pub use countdown::Countdown;
pub use state::DropState;
pub use stock::{LOW_STOCK_PERCENT, StockIndicator, StockLevel};

/// A time-boxed, limited-quantity product release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropRecord {
    /// Drop identifier.
    pub id: DropId,

    /// Display title.
    pub title: String,

    /// Unit price.
    pub price: Decimal,

    /// Units released for this drop.
    pub quantity_available: u32,

    /// Units sold so far.
    pub quantity_sold: u32,

    /// When the drop opens.
    pub starts_at: Timestamp,

    /// When the drop closes.
    pub ends_at: Timestamp,
}

impl DropRecord {
    /// Units still available, never negative.
    pub fn remaining(&self) -> u32 {
        self.quantity_available.saturating_sub(self.quantity_sold)
    }
}
