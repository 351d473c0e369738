//! Longitude band covered by a time zone

use rand::Rng;

/// Degrees of longitude per hour of offset
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const HALF_WIDTH: f64 = DEGREES_PER_HOUR / 2.0;

/// Latitude span of the highlight (as far as a Mercator map goes)
pub const LAT_LIMIT: f64 = 85.0;

/// Latitudes tooth markers are scattered over
const MARKER_LAT: (f64, f64) = (-50.0, 50.0);
/// Share of the band width kept clear on each side of the markers
const MARKER_MARGIN: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBand {
    pub offset: i32,
    pub center: f64,
    pub left: f64,
    pub right: f64,
}

impl ZoneBand {
    pub fn for_offset(offset: i32) -> Self {
        let center = offset as f64 * DEGREES_PER_HOUR;
        Self {
            offset,
            center,
            left: center - HALF_WIDTH,
            right: center + HALF_WIDTH,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Whether a longitude in [-180, 180] falls inside the band. The +12 band
    /// pokes past 180°, so the wrapped side counts too.
    pub fn contains_lon(&self, lon: f64) -> bool {
        [lon, lon - 360.0, lon + 360.0]
            .iter()
            .any(|&l| l >= self.left && l <= self.right)
    }

    /// Random (lon, lat) points inside the band for the tooth markers
    pub fn scatter<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<(f64, f64)> {
        let margin = self.width() * MARKER_MARGIN;
        let (lon_min, lon_max) = (self.left + margin, self.right - margin);
        (0..count)
            .map(|_| {
                let lon = wrap_lon(rng.gen_range(lon_min..lon_max));
                let lat = rng.gen_range(MARKER_LAT.0..MARKER_LAT.1);
                (lon, lat)
            })
            .collect()
    }
}

/// Bring a longitude into [-180, 180)
pub fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn band_is_fifteen_degrees_around_center() {
        for offset in -12..=12 {
            let band = ZoneBand::for_offset(offset);
            assert_eq!(band.width(), 15.0);
            assert_eq!(band.center, offset as f64 * 15.0);
            assert_eq!((band.left + band.right) / 2.0, band.center);
        }
    }

    #[test]
    fn edges() {
        let band = ZoneBand::for_offset(-5);
        assert_eq!((band.left, band.right), (-82.5, -67.5));
    }

    #[test]
    fn date_line_band_wraps() {
        let band = ZoneBand::for_offset(12);
        assert!(band.contains_lon(179.0));
        assert!(band.contains_lon(-179.0));
        assert!(!band.contains_lon(170.0));
    }

    #[test]
    fn scatter_stays_inside_margins() {
        let mut rng = StdRng::seed_from_u64(7);
        let band = ZoneBand::for_offset(3);
        let points = band.scatter(&mut rng, 200);
        assert_eq!(points.len(), 200);
        for (lon, lat) in points {
            assert!((39.0..=51.0).contains(&lon), "lon {}", lon);
            assert!((-50.0..=50.0).contains(&lat), "lat {}", lat);
        }
    }

    #[test]
    fn wraps_longitudes() {
        assert_eq!(wrap_lon(190.0), -170.0);
        assert_eq!(wrap_lon(-190.0), 170.0);
        assert_eq!(wrap_lon(45.0), 45.0);
    }
}
