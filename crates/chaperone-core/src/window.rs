//! Relative date windows for the scheduling view.
//!
//! Windows are computed from an injected "now" so callers (and tests) control
//! the anchor. Weeks run Sunday through Saturday: `this-week` reaches the
//! upcoming Sunday, `next-week` covers the Monday..Sunday span after that.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;

/// Named relative date-range option, anchored to "now" when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFilter {
    #[serde(rename = "this-week")]
    ThisWeek,
    #[serde(rename = "next-week")]
    NextWeek,
    #[serde(rename = "this-month")]
    ThisMonth,
    #[serde(rename = "7-days")]
    Days7,
    #[serde(rename = "14-days")]
    Days14,
    #[serde(rename = "21-days")]
    Days21,
}

/// A closed `[start, end]` interval of local instants. Always derived from a
/// [`DateFilter`] and a concrete "now"; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Inclusive membership test on both ends.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Membership test on an event's start instant.
    pub fn contains_event(&self, event: &CalendarEvent) -> bool {
        self.contains(event.start)
    }
}

impl DateFilter {
    /// Every option, in display order.
    pub const ALL: [DateFilter; 6] = [
        DateFilter::ThisWeek,
        DateFilter::NextWeek,
        DateFilter::ThisMonth,
        DateFilter::Days7,
        DateFilter::Days14,
        DateFilter::Days21,
    ];

    /// Wire identifier, matching the UI selection values.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilter::ThisWeek => "this-week",
            DateFilter::NextWeek => "next-week",
            DateFilter::ThisMonth => "this-month",
            DateFilter::Days7 => "7-days",
            DateFilter::Days14 => "14-days",
            DateFilter::Days21 => "21-days",
        }
    }

    /// Human label for filter rows.
    pub fn label(&self) -> &'static str {
        match self {
            DateFilter::ThisWeek => "This Week",
            DateFilter::NextWeek => "Next Week",
            DateFilter::ThisMonth => "This Month",
            DateFilter::Days7 => "7 Days",
            DateFilter::Days14 => "14 Days",
            DateFilter::Days21 => "21 Days",
        }
    }

    /// Resolve the concrete window for this option, anchored at `now`.
    ///
    /// The window always starts at the floor of the current day (00:00:00.000)
    /// and ends at the last millisecond of its final day (23:59:59.999).
    pub fn window(&self, now: NaiveDateTime) -> DateWindow {
        let today = now.date();
        match self {
            DateFilter::ThisWeek => span(today, upcoming_sunday(today)),
            DateFilter::NextWeek => {
                let monday = upcoming_sunday(today) + Duration::days(1);
                span(monday, monday + Duration::days(6))
            }
            DateFilter::ThisMonth => span(today, last_day_of_month(today)),
            DateFilter::Days7 => span(today, today + Duration::days(6)),
            DateFilter::Days14 => span(today, today + Duration::days(13)),
            DateFilter::Days21 => span(today, today + Duration::days(20)),
        }
    }

    /// Whether the event's start instant falls inside this option's window.
    ///
    /// For the options-by-events hot path, resolve [`Self::window`] once and
    /// call [`DateWindow::contains`] with pre-parsed instants instead.
    pub fn contains_event(&self, event: &CalendarEvent, now: NaiveDateTime) -> bool {
        self.window(now).contains_event(event)
    }
}

impl std::str::FromStr for DateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown date filter: {s}"))
    }
}

impl std::fmt::Display for DateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn span(first_day: NaiveDate, last_day: NaiveDate) -> DateWindow {
    DateWindow {
        start: first_day.and_time(NaiveTime::MIN),
        end: last_day.and_time(end_of_day()),
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid wall-clock time")
}

/// The next Sunday at or after `date` (`date` itself on a Sunday).
fn upcoming_sunday(date: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(i64::from(days_ahead))
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("valid first of month")
        .pred_opt()
        .expect("date has a predecessor")
}
