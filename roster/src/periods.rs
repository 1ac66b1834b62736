use std::cmp::Ordering;
use std::fmt;

use serde_derive::{Deserialize, Serialize};

/// The set of periods that together partition a working day.
///
/// A planning, a shift range and a holiday each stay within one family;
/// mixing them is rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodFamily {
    DayAndEvening,
    EarlyLateNight,
}

impl PeriodFamily {
    /// All periods of the family, sorted by ordinal value.
    pub const fn periods(self) -> &'static [Period] {
        match self {
            PeriodFamily::DayAndEvening => &[Period::Day, Period::Evening],
            PeriodFamily::EarlyLateNight => &[Period::Early, Period::Late, Period::Night],
        }
    }

    /// Earliest period of the family.
    pub fn first(self) -> Period {
        self.periods()[0]
    }

    /// Latest period of the family.
    pub fn last(self) -> Period {
        self.periods()[self.periods().len() - 1]
    }
}

/// A daily shift period, ordered by its ordinal value within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Day,
    Evening,
    Early,
    Late,
    Night,
}

impl Period {
    pub const fn family(self) -> PeriodFamily {
        match self {
            Period::Day | Period::Evening => PeriodFamily::DayAndEvening,
            Period::Early | Period::Late | Period::Night => PeriodFamily::EarlyLateNight,
        }
    }

    /// Ordinal within the family; earlier periods have smaller values.
    pub const fn value(self) -> u8 {
        match self {
            Period::Day | Period::Early => 1,
            Period::Evening | Period::Late => 2,
            Period::Night => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Evening => "evening",
            Period::Early => "early",
            Period::Late => "late",
            Period::Night => "night",
        }
    }

    const fn sort_key(self) -> (u8, u8) {
        (self.family() as u8, self.value())
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
