//! Drop State

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use super::DropRecord;

/// The phase a drop is in at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropState {
    /// Not open yet.
    Upcoming,

    /// Open and purchasable.
    Live,

    /// Open or closed, with no stock left.
    SoldOut,

    /// Closed with stock left over.
    Ended,
}

impl DropState {
    /// Select the state of `drop` at `now`.
    ///
    /// Before the start time a drop is always upcoming. After that, running out of stock wins
    /// over the end time.
    pub fn select(drop: &DropRecord, now: Timestamp) -> Self {
        if now < drop.starts_at {
            Self::Upcoming
        } else if drop.remaining() == 0 {
            Self::SoldOut
        } else if now >= drop.ends_at {
            Self::Ended
        } else {
            Self::Live
        }
    }

    /// Whether shoppers may add this drop to their cart.
    pub fn is_purchasable(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl Display for DropState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::SoldOut => "sold out",
            Self::Ended => "ended",
        })
    }
}
