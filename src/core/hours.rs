//! Ordering-hours policy.
//!
//! Coffee orders are accepted only inside fixed daily windows of local time.
//! Each window is half-open: the end hour itself is already closed.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// A half-open range of local hours, `start <= hour < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// Morning and lunchtime serving windows.
pub const ORDERING_WINDOWS: [HourWindow; 2] = [HourWindow::new(8, 10), HourWindow::new(12, 14)];

/// Decides whether the coffee bar is taking orders at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingHours {
    timezone: Tz,
    windows: Vec<HourWindow>,
}

impl Default for OrderingHours {
    fn default() -> Self {
        Self::new(chrono_tz::US::Pacific)
    }
}

impl OrderingHours {
    #[must_use]
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            windows: ORDERING_WINDOWS.to_vec(),
        }
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Hour of day (0-23) of `now` in the policy's civil time zone.
    #[must_use]
    pub fn local_hour(&self, now: DateTime<Utc>) -> u32 {
        now.with_timezone(&self.timezone).hour()
    }

    #[must_use]
    pub fn is_open_hour(&self, hour: u32) -> bool {
        self.windows.iter().any(|w| w.contains(hour))
    }

    #[must_use]
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.is_open_hour(self.local_hour(now))
    }

    /// Human-readable list of the windows, e.g. `*8–10am* and *12–2pm*`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.windows
            .iter()
            .map(|w| format!("*{}*", format_window(*w)))
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

fn format_window(window: HourWindow) -> String {
    let (start, start_meridiem) = twelve_hour(window.start);
    let (end, end_meridiem) = twelve_hour(window.end);

    if start_meridiem == end_meridiem {
        format!("{start}–{end}{end_meridiem}")
    } else {
        format!("{start}{start_meridiem}–{end}{end_meridiem}")
    }
}

fn twelve_hour(hour: u32) -> (u32, &'static str) {
    let meridiem = if hour % 24 < 12 { "am" } else { "pm" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    (display, meridiem)
}
