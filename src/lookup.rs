//! Matching the midnight zone to a dataset row
//!
//! The spreadsheet uses fractional offsets (UTC+5:30 is `5.5`) and does not
//! list every integer zone, so matching falls back in tiers:
//!
//! 1. first row within 0.6 hours of the target
//! 2. first row whose floored offset is within 1 of the target
//! 3. row with the smallest floored distance, earliest on ties
//!
//! Only an empty dataset yields no match.

use crate::dataset::TimezoneRow;

const NEAR: f64 = 0.6;
const FLOOR_NEAR: f64 = 1.0;

pub fn lookup(rows: &[TimezoneRow], target: i32) -> Option<&TimezoneRow> {
    let target = target as f64;
    let floor_distance = |row: &TimezoneRow| (row.utc_offset.floor() - target).abs();

    rows.iter()
        .find(|row| (row.utc_offset - target).abs() < NEAR)
        .or_else(|| rows.iter().find(|row| floor_distance(row) < FLOOR_NEAR))
        .or_else(|| {
            // min_by returns the last of equal elements; fold keeps the first
            rows.iter().fold(None, |best: Option<&TimezoneRow>, row| match best {
                Some(b) if floor_distance(b) <= floor_distance(row) => Some(b),
                _ => Some(row),
            })
        })
}

/// Quantity for the target zone, `None` when there is nothing to show
pub fn lookup_quantity(rows: &[TimezoneRow], target: i32) -> Option<f64> {
    lookup(rows, target).map(|row| row.quantity)
}

/// Whether a chart bar belongs to the target zone. Looser than [`lookup`]:
/// a half-hour zone lights up for both neighbouring integer zones.
pub fn is_current_bar(offset: f64, target: i32) -> bool {
    let t = target as f64;
    (offset - t).abs() < NEAR || (offset.floor() - t).abs() < NEAR || (offset.ceil() - t).abs() < NEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(utc_offset: f64, quantity: f64) -> TimezoneRow {
        TimezoneRow { utc_offset, quantity }
    }

    fn sample() -> Vec<TimezoneRow> {
        vec![row(-5.0, 100.0), row(3.5, 200.0)]
    }

    #[test]
    fn exact_offset() {
        assert_eq!(lookup_quantity(&sample(), -5), Some(100.0));
    }

    #[test]
    fn fractional_offset_within_tolerance() {
        // |3.5 - 4| = 0.5
        assert_eq!(lookup_quantity(&sample(), 4), Some(200.0));
        // |3.5 - 3| = 0.5
        assert_eq!(lookup_quantity(&sample(), 3), Some(200.0));
    }

    #[test]
    fn floored_offset_tier() {
        // |5.75 - 5| = 0.75 misses the first tier, floor(5.75) = 5 hits the second
        let rows = vec![row(-3.0, 1.0), row(5.75, 2.0)];
        assert_eq!(lookup_quantity(&rows, 5), Some(2.0));
    }

    #[test]
    fn first_tier_beats_earlier_second_tier_row() {
        let rows = vec![row(6.75, 1.0), row(7.0, 2.0)];
        // 6.75 is within 0.6 of 7 as well, and comes first
        assert_eq!(lookup_quantity(&rows, 7), Some(1.0));
        let rows = vec![row(6.25, 1.0), row(7.0, 2.0)];
        // 6.25 only matches tier 2; 7.0 matches tier 1
        assert_eq!(lookup_quantity(&rows, 7), Some(2.0));
    }

    #[test]
    fn nearest_when_nothing_close() {
        assert_eq!(lookup_quantity(&sample(), 10), Some(200.0));
        assert_eq!(lookup_quantity(&sample(), -11), Some(100.0));
    }

    #[test]
    fn nearest_ties_go_to_first() {
        let rows = vec![row(-2.0, 1.0), row(2.0, 2.0)];
        assert_eq!(lookup_quantity(&rows, 0), Some(1.0));
        let rows = vec![row(2.0, 2.0), row(-2.0, 1.0)];
        assert_eq!(lookup_quantity(&rows, 0), Some(2.0));
    }

    #[test]
    fn empty_has_no_data() {
        for target in -12..=12 {
            assert_eq!(lookup(&[], target), None);
        }
    }

    #[test]
    fn always_a_match_when_not_empty() {
        let rows = vec![row(12.75, 9.0)];
        for target in -12..=12 {
            assert_eq!(lookup_quantity(&rows, target), Some(9.0));
        }
    }

    #[test]
    fn chart_highlight() {
        assert!(is_current_bar(5.5, 5));
        assert!(is_current_bar(5.5, 6));
        assert!(is_current_bar(-3.0, -3));
        assert!(!is_current_bar(-3.0, -2));
        assert!(!is_current_bar(5.75, 7));
    }
}
