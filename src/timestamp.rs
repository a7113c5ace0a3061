//! Timestamps for stored rows
//!
//! Rows carry ISO-8601 strings. They are rendered in UTC with a fixed
//! microsecond width so that string order matches time order in SQL.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use std::cell::Cell;
use std::sync::{Arc, Mutex};

/// Source of the current time
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Render a time the way it is stored
pub fn format(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored stamp. Accepts any RFC 3339 form, including the
/// millisecond stamps written by older clients.
pub fn parse(stamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(stamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Issues stamps that strictly increase, even when the clock stalls or
/// steps backwards.
pub struct Stamper {
    clock: Box<dyn Clock>,
    last: Cell<Option<DateTime<Utc>>>,
}

impl Stamper {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last: Cell::new(None),
        }
    }

    /// Never issue anything at or before `floor`
    pub fn raise_floor(&self, floor: DateTime<Utc>) {
        match self.last.get() {
            Some(last) if last >= floor => {}
            _ => self.last.set(Some(floor)),
        }
    }

    pub fn next(&self) -> String {
        // Stored form keeps microseconds only
        let now = self.clock.now().trunc_subsecs(6);
        let at = match self.last.get() {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last.set(Some(at));
        format(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_is_fixed_width_utc() {
        assert_eq!(format(start()), "2024-05-01T12:00:00.000000Z");
    }

    #[test]
    fn test_stamps_strictly_increase_on_stalled_clock() {
        let clock = ManualClock::new(start());
        let stamper = Stamper::new(Box::new(clock.clone()));

        let a = stamper.next();
        let b = stamper.next();
        assert!(b > a);

        clock.set(start() - Duration::seconds(10));
        let c = stamper.next();
        assert!(c > b);
    }

    #[test]
    fn test_stamps_follow_clock_when_it_moves_forward() {
        let clock = ManualClock::new(start());
        let stamper = Stamper::new(Box::new(clock.clone()));

        stamper.next();
        clock.advance(Duration::seconds(5));
        assert_eq!(stamper.next(), "2024-05-01T12:00:05.000000Z");
    }

    #[test]
    fn test_sub_microsecond_ticks_still_increase() {
        let clock = ManualClock::new(start());
        let stamper = Stamper::new(Box::new(clock.clone()));

        let a = stamper.next();
        clock.advance(Duration::nanoseconds(500));
        let b = stamper.next();
        assert!(b > a);
    }

    #[test]
    fn test_raise_floor() {
        let clock = ManualClock::new(start());
        let stamper = Stamper::new(Box::new(clock));

        stamper.raise_floor(start() + Duration::seconds(1));
        assert_eq!(stamper.next(), "2024-05-01T12:00:01.000001Z");
    }

    #[test]
    fn test_parse_accepts_millisecond_stamps() {
        let parsed = parse("2024-05-01T12:00:00.250Z").unwrap();
        assert_eq!(parsed, start() + Duration::milliseconds(250));
        assert!(parse("not a date").is_none());
    }
}
