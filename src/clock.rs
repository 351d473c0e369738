//! Midnight-zone clock
//!
//! The Ratón Pérez works where it is 00:00. Going west from UTC, the zone at
//! midnight is `-h`; once UTC passes noon the next day's midnight is closer
//! going east, so the zone becomes `24 - h`. The jump at 12:00 UTC is kept as
//! is (no smoothing across the date line).

use chrono::{DateTime, Timelike, Utc};

/// Source of "now". Views never call `Utc::now()` directly so a frozen
/// instant renders identically every tick.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant (`--at`)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Offset of the zone at local midnight for a UTC hour in 0..=23.
#[inline]
pub fn midnight_offset_for_hour(utc_hour: u32) -> i32 {
    let h = (utc_hour % 24) as i32;
    if h < 12 {
        -h
    } else {
        24 - h
    }
}

/// Offset of the zone currently at local midnight, in [-11, 12].
pub fn midnight_offset(now: DateTime<Utc>) -> i32 {
    midnight_offset_for_hour(now.hour())
}

/// `UTC+3`, `UTC-5`, `UTC+0`, `UTC+5.5`
pub fn format_offset(offset: f64) -> String {
    // -0.0 would print as "-0"
    let offset = if offset == 0.0 { 0.0 } else { offset };
    let sign = if offset >= 0.0 { "+" } else { "" };
    // f64 Display already drops a trailing ".0"
    format!("UTC{}{}", sign, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn morning_hours_go_west() {
        for h in 0..12 {
            assert_eq!(midnight_offset_for_hour(h), -(h as i32));
        }
    }

    #[test]
    fn afternoon_hours_go_east() {
        for h in 12..24 {
            assert_eq!(midnight_offset_for_hour(h), 24 - h as i32);
        }
    }

    #[test]
    fn offset_stays_in_range() {
        for h in 0..24 {
            let o = midnight_offset_for_hour(h);
            assert!((-12..=12).contains(&o), "hour {} gave {}", h, o);
        }
    }

    #[test]
    fn jump_at_noon() {
        assert_eq!(midnight_offset_for_hour(11), -11);
        assert_eq!(midnight_offset_for_hour(12), 12);
    }

    #[test]
    fn uses_utc_hour_of_instant() {
        let t = Utc.with_ymd_and_hms(2025, 3, 14, 13, 59, 59).unwrap();
        assert_eq!(midnight_offset(t), 11);
        let t = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(midnight_offset(t), 0);
    }

    #[test]
    fn fixed_clock_is_frozen() {
        let t = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        let clock = FixedClock(t);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(midnight_offset(clock.now()), 1);
    }

    #[test]
    fn offset_labels() {
        assert_eq!(format_offset(3.0), "UTC+3");
        assert_eq!(format_offset(-5.0), "UTC-5");
        assert_eq!(format_offset(0.0), "UTC+0");
        assert_eq!(format_offset(5.5), "UTC+5.5");
    }
}
