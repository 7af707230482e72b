//! Countdown

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use super::{DropRecord, DropState};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Time left until a target moment, split into display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    /// Whole days.
    pub days: i64,

    /// Hours within the day.
    pub hours: i64,

    /// Minutes within the hour.
    pub minutes: i64,

    /// Seconds within the minute.
    pub seconds: i64,
}

impl Countdown {
    /// Time from `now` until `target`, all zero when `target` has passed.
    pub fn between(now: Timestamp, target: Timestamp) -> Self {
        let total = (target.as_second() - now.as_second()).max(0);

        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// Countdown to the drop's next phase change: the opening while upcoming, the close while
    /// live. Drops that are sold out or ended have nothing to count down to.
    pub fn for_drop(drop: &DropRecord, now: Timestamp) -> Option<Self> {
        match DropState::select(drop, now) {
            DropState::Upcoming => Some(Self::between(now, drop.starts_at)),
            DropState::Live => Some(Self::between(now, drop.ends_at)),
            DropState::SoldOut | DropState::Ended => None,
        }
    }

    /// Whether the target has been reached.
    pub fn is_elapsed(&self) -> bool {
        self.total_seconds() == 0
    }

    /// Remaining time in seconds.
    pub fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
