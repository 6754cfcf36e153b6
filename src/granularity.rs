// used to render positions and to count calendar units between them
use chrono::{DateTime, Datelike, NaiveDateTime};

// used to print out readable forms of a granularity
use std::fmt;

/// A time position: milliseconds since the Unix epoch (UTC).
pub type Position = i64;

/// The precision a bound was recorded with. It travels alongside the bound
/// and is never derived from it.
#[derive(Eq, PartialEq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default)]
pub enum Granularity {
    #[default]
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Granularity {
    /// Length of one unit in milliseconds, for the units that have a fixed one.
    pub fn fixed_millis(&self) -> Option<i64> {
        match self {
            Granularity::Millisecond => Some(1),
            Granularity::Second => Some(1_000),
            Granularity::Minute => Some(60_000),
            Granularity::Hour => Some(3_600_000),
            Granularity::Day => Some(86_400_000),
            Granularity::Month | Granularity::Year => None,
        }
    }
    pub fn position_of(datetime: &NaiveDateTime) -> Position {
        datetime.and_utc().timestamp_millis()
    }
    pub fn datetime_of(position: Position) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(position).map(|d| d.naive_utc())
    }
    /// Renders a position at this granularity, e.g. `2020-01-31` for `Day`.
    /// Positions outside chrono's range fall back to the raw number.
    pub fn format(&self, position: Position) -> String {
        let pattern = match self {
            Granularity::Millisecond => "%Y-%m-%d %H:%M:%S%.3f",
            Granularity::Second => "%Y-%m-%d %H:%M:%S",
            Granularity::Minute => "%Y-%m-%d %H:%M",
            Granularity::Hour => "%Y-%m-%d %H",
            Granularity::Day => "%Y-%m-%d",
            Granularity::Month => "%Y-%m",
            Granularity::Year => "%Y",
        };
        match Self::datetime_of(position) {
            Some(datetime) => datetime.format(pattern).to_string(),
            None => position.to_string(),
        }
    }
    /// Number of whole units from `from` to `to` (negative when `to` is earlier).
    /// Months and years count calendar boundaries crossed. `None` when the
    /// span does not fit an `i64` or a position is outside chrono's range.
    pub fn distance(&self, from: Position, to: Position) -> Option<i64> {
        if let Some(unit) = self.fixed_millis() {
            return to.checked_sub(from).map(|span| span / unit);
        }
        let from = Self::datetime_of(from)?;
        let to = Self::datetime_of(to)?;
        let months = (to.year() as i64 * 12 + to.month0() as i64)
            - (from.year() as i64 * 12 + from.month0() as i64);
        match self {
            Granularity::Year => Some((to.year() - from.year()) as i64),
            _ => Some(months),
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Millisecond => "millisecond",
            Granularity::Second => "second",
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
