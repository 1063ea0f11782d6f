use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Weekend classification for trading days.
///
/// The market's calendar timezone is an explicit configuration value, carried
/// as a whole-hour UTC offset (`CALENDAR_UTC_OFFSET_HOURS`, e.g. 8 for the
/// China market convention). Instants are shifted into that offset before the
/// weekday test; bare calendar dates already live in market-local terms and
/// are tested as-is.
#[derive(Debug, Clone, Copy)]
pub struct TradingCalendar {
    utc_offset_hours: i32,
}

impl TradingCalendar {
    pub fn new(utc_offset_hours: i32) -> Self {
        Self { utc_offset_hours }
    }

    pub fn utc_offset_hours(&self) -> i32 {
        self.utc_offset_hours
    }

    /// Saturday/Sunday test on a market-local calendar date.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Saturday/Sunday test on an instant, after shifting into the market's
    /// offset. A Friday 23:00 UTC instant is a Saturday under UTC+8.
    pub fn is_weekend_at(&self, instant: DateTime<Utc>) -> bool {
        self.is_weekend(self.local_date(instant))
    }

    /// The market-local calendar date an instant falls on.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        (instant + Duration::hours(self.utc_offset_hours as i64)).date_naive()
    }
}

impl Default for TradingCalendar {
    fn default() -> Self {
        Self::new(0)
    }
}
