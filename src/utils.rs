use chrono::{DateTime, Duration, Local};
use std::cell::Cell;

/// Source of "now" for anything that stamps or compares times.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

/// Short local date-time for labels.
#[must_use]
pub fn format_time(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Rough English age of `time` relative to `now`.
#[must_use]
pub fn time_ago(time: &DateTime<Local>, now: &DateTime<Local>) -> String {
    let elapsed = now.signed_duration_since(*time);
    if elapsed < Duration::zero() {
        return "in the future".to_string();
    }

    let mins = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if mins < 1 {
        "just now".to_string()
    } else if hours < 1 {
        format!("{} min ago", mins)
    } else if hours < 24 {
        format!("{} h ago", hours)
    } else if days == 1 {
        "1 day ago".to_string()
    } else {
        format!("{} days ago", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn time_ago_buckets() {
        let now = Local.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();

        assert_eq!(time_ago(&now, &now), "just now");
        assert_eq!(time_ago(&(now - Duration::minutes(5)), &now), "5 min ago");
        assert_eq!(time_ago(&(now - Duration::hours(3)), &now), "3 h ago");
        assert_eq!(time_ago(&(now - Duration::hours(30)), &now), "1 day ago");
        assert_eq!(time_ago(&(now - Duration::days(9)), &now), "9 days ago");
        assert_eq!(time_ago(&(now + Duration::hours(1)), &now), "in the future");
    }

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let start = Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::days(2));
        assert_eq!(clock.now(), start + Duration::days(2));

        clock.set(start);
        assert_eq!(format_time(&clock.now()), "2024-01-01 08:00");
    }
}
