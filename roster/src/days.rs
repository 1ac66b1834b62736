use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde_derive::{Deserialize, Serialize};

/// All week days in ISO order, Monday first.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// ISO week days 6 and 7.
pub const WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// Public-holiday predicate. Region-specific calendars live outside the
/// core and plug in through this trait.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Calendar without any holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Calendar backed by an explicit set of dates.
#[derive(Debug, Clone, Default)]
pub struct FixedHolidays {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidays {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for FixedHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// A calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Day {
    date: NaiveDate,
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(self) -> NaiveDate {
        self.date
    }

    pub fn week_day(self) -> Weekday {
        self.date.weekday()
    }

    /// ISO week-day number, Monday = 1.
    pub fn week_day_number(self) -> u32 {
        self.date.weekday().number_from_monday()
    }

    pub fn week_number(self) -> u32 {
        self.date.iso_week().week()
    }

    /// Year the ISO week belongs to; differs from the calendar year around
    /// new year.
    pub fn iso_year(self) -> i32 {
        self.date.iso_week().year()
    }

    pub fn month(self) -> u32 {
        self.date.month()
    }

    pub fn is_weekend(self) -> bool {
        self.week_day_number() > 5
    }

    pub fn is_holiday(self, calendar: &impl HolidayCalendar) -> bool {
        calendar.is_holiday(self.date)
    }

    pub(crate) fn next(self) -> Option<Day> {
        self.date.succ_opt().map(Day::new)
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Day::new(date)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (week: {})",
            self.date.format("%A %-d %B"),
            self.week_number()
        )
    }
}
