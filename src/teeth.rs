//! Teeth collected since New Year

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Teeth the mouse collects worldwide per day
pub const TEETH_PER_DAY: f64 = 111_316_449.0;

/// Share of collected teeth with cavities
pub const CAVITY_FRACTION: f64 = 0.05;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

#[derive(Debug, Clone, Copy)]
pub struct TeethAccumulator {
    pub per_day: f64,
    pub cavity_fraction: f64,
}

impl Default for TeethAccumulator {
    fn default() -> Self {
        Self {
            per_day: TEETH_PER_DAY,
            cavity_fraction: CAVITY_FRACTION,
        }
    }
}

impl TeethAccumulator {
    pub fn new(per_day: f64, cavity_fraction: f64) -> Self {
        Self {
            per_day: per_day.max(0.0),
            cavity_fraction: cavity_fraction.clamp(0.0, 1.0),
        }
    }

    /// Teeth collected between Jan 1 00:00 (in `now`'s zone) and `now`.
    pub fn collected<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> f64 {
        self.collected_over(elapsed_days(now))
    }

    /// The cavity subset of [`collected`](Self::collected).
    pub fn cavities<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> f64 {
        self.cavities_over(elapsed_days(now))
    }

    /// Teeth collected over `days` (fractional) days
    pub fn collected_over(&self, days: f64) -> f64 {
        days.max(0.0) * self.per_day
    }

    pub fn cavities_over(&self, days: f64) -> f64 {
        self.collected_over(days) * self.cavity_fraction
    }
}

/// Midnight on Jan 1 of `now`'s year, in `now`'s zone.
///
/// Falls back to `now` itself when that local midnight does not exist (a
/// zone that skipped Jan 1 00:00), which just restarts the count.
pub fn start_of_year<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
        .unwrap_or_else(|| now.clone())
}

/// Fractional days since [`start_of_year`]; never negative.
pub fn elapsed_days<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    let start = start_of_year(now);
    let millis = now.clone().signed_duration_since(start).num_milliseconds();
    (millis.max(0) as f64) / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    #[test]
    fn zero_at_new_year() {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let acc = TeethAccumulator::default();
        assert_eq!(acc.collected(&t), 0.0);
        assert_eq!(acc.cavities(&t), 0.0);
    }

    #[test]
    fn one_day_is_one_rate() {
        let t = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let acc = TeethAccumulator::default();
        assert!((acc.collected(&t) - TEETH_PER_DAY).abs() < 1e-3);
    }

    #[test]
    fn half_day_is_half_rate() {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let acc = TeethAccumulator::new(100.0, 0.05);
        assert!((acc.collected(&t) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn monotonic_within_year() {
        let acc = TeethAccumulator::default();
        let mut t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut prev = acc.collected(&t);
        while t.year() == 2024 {
            t += Duration::hours(7) + Duration::milliseconds(123);
            if t.year() != 2024 {
                break;
            }
            let next = acc.collected(&t);
            assert!(next >= prev, "{} < {} at {}", next, prev, t);
            prev = next;
        }
    }

    #[test]
    fn resets_at_year_boundary() {
        let acc = TeethAccumulator::default();
        let before = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        // 2024 is a leap year: almost 366 days
        assert!(acc.collected(&before) > 365.9 * TEETH_PER_DAY);
        assert_eq!(acc.collected(&after), 0.0);
    }

    #[test]
    fn cavities_are_five_percent() {
        let acc = TeethAccumulator::default();
        let t = Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 12).unwrap();
        let total = acc.collected(&t);
        assert_eq!(acc.cavities(&t), total * CAVITY_FRACTION);
    }

    #[test]
    fn start_of_year_follows_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        // 23:00 UTC on Dec 31 is already 01:00 Jan 1 at UTC+2
        let t = Utc
            .with_ymd_and_hms(2024, 12, 31, 23, 0, 0)
            .unwrap()
            .with_timezone(&tz);
        assert_eq!(start_of_year(&t).year(), 2025);
        assert!((elapsed_days(&t) - 1.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn span_of_days_matches_instant() {
        let acc = TeethAccumulator::default();
        let t = Utc.with_ymd_and_hms(2025, 3, 4, 18, 0, 0).unwrap();
        assert_eq!(acc.collected_over(elapsed_days(&t)), acc.collected(&t));
        assert_eq!(acc.cavities_over(elapsed_days(&t)), acc.cavities(&t));
        assert_eq!(acc.collected_over(-1.0), 0.0);
    }

    #[test]
    fn new_clamps_inputs() {
        let acc = TeethAccumulator::new(-5.0, 1.5);
        assert_eq!(acc.per_day, 0.0);
        assert_eq!(acc.cavity_fraction, 1.0);
    }
}
