//! Number formatting for the panels

/// Whole part with Spanish digit grouping: `111.316.449`.
/// Spanish leaves four-digit numbers ungrouped (`1234`).
pub fn group_es(value: f64) -> String {
    let whole = value.floor();
    let negative = whole < 0.0;
    let digits = format!("{:.0}", whole.abs());

    let grouped = if digits.len() <= 4 {
        digits
    } else {
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    };

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Short axis label: `1.2M`, `3.4K`, `950`
pub fn compact(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        // `{}` drops a trailing ".0"
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(group_es(111_316_449.0), "111.316.449");
        assert_eq!(group_es(12_345.0), "12.345");
        assert_eq!(group_es(1_000_000.0), "1.000.000");
    }

    #[test]
    fn short_numbers_ungrouped() {
        assert_eq!(group_es(0.0), "0");
        assert_eq!(group_es(999.0), "999");
        assert_eq!(group_es(1234.0), "1234");
    }

    #[test]
    fn drops_fraction() {
        assert_eq!(group_es(12_345.999), "12.345");
        assert_eq!(group_es(0.4), "0");
    }

    #[test]
    fn negative_values() {
        assert_eq!(group_es(-12_345.0), "-12.345");
    }

    #[test]
    fn compact_labels() {
        assert_eq!(compact(2_500_000.0), "2.5M");
        assert_eq!(compact(1_000_000.0), "1.0M");
        assert_eq!(compact(3_400.0), "3.4K");
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(0.0), "0");
    }
}
