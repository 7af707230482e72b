//! Stock Indicator

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::DropRecord;

/// Remaining stock, as a percentage of the release, at or below which stock counts as low.
pub const LOW_STOCK_PERCENT: u64 = 20;

/// Coarse stock level shown next to a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Plenty left.
    InStock,

    /// Few units left.
    Low,

    /// Nothing left.
    SoldOut,
}

impl Display for StockLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::InStock => "in stock",
            Self::Low => "low stock",
            Self::SoldOut => "sold out",
        })
    }
}

/// Stock figures for a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockIndicator {
    /// Units still available.
    pub remaining: u32,

    /// Share of the release sold, 0 to 100, rounded down.
    pub percent_sold: u8,

    /// Coarse level.
    pub level: StockLevel,
}

impl StockIndicator {
    /// Compute the indicator for a drop.
    pub fn for_drop(drop: &DropRecord) -> Self {
        let available = u64::from(drop.quantity_available);
        let remaining = drop.remaining();
        let sold = available - u64::from(remaining);

        let percent_sold = if available == 0 {
            100
        } else {
            u8::try_from(sold * 100 / available).unwrap_or(100)
        };

        let level = if remaining == 0 {
            StockLevel::SoldOut
        } else if u64::from(remaining) * 100 <= available * LOW_STOCK_PERCENT {
            StockLevel::Low
        } else {
            StockLevel::InStock
        };

        Self {
            remaining,
            percent_sold,
            level,
        }
    }
}
