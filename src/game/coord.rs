//! Grid coordinates.

// Floor-then-cast is the intended degree-to-cell conversion
#![allow(clippy::cast_possible_truncation)]

use std::fmt;
use std::str::FromStr;

/// A cell on the unbounded grid.
///
/// `i` runs along latitude (north is positive), `j` along longitude (east is
/// positive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Row (latitude axis).
    pub i: i64,
    /// Column (longitude axis).
    pub j: i64,
}

impl CellCoord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }

    /// Cell containing a geographic point, or `None` if either input is not finite.
    #[must_use]
    pub fn from_lat_lng(lat: f64, lng: f64, cell_size: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(Self::new(
            degrees_to_cell(lat, cell_size),
            degrees_to_cell(lng, cell_size),
        ))
    }

    /// Translate by a relative offset. Saturates at the edges of `i64`.
    #[must_use]
    pub const fn offset(self, di: i64, dj: i64) -> Self {
        Self::new(self.i.saturating_add(di), self.j.saturating_add(dj))
    }

    /// Chebyshev distance: the larger of the row and column differences.
    #[must_use]
    pub const fn chebyshev(self, other: Self) -> u64 {
        let di = self.i.abs_diff(other.i);
        let dj = self.j.abs_diff(other.j);
        if di > dj { di } else { dj }
    }

    /// Key used for this cell in snapshots and generator input: `"i,j"`.
    #[must_use]
    pub fn key(self) -> String {
        format!("{},{}", self.i, self.j)
    }
}

/// Floor-divide a degree value into cell units.
pub(crate) fn degrees_to_cell(degrees: f64, cell_size: f64) -> i64 {
    // `as` saturates for out-of-range floats.
    (degrees / cell_size).floor() as i64
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

impl FromStr for CellCoord {
    type Err = ();

    /// Parse the `"i,j"` key form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (i, j) = s.split_once(',').ok_or(())?;
        let i = i.trim().parse().map_err(|_| ())?;
        let j = j.trim().parse().map_err(|_| ())?;
        Ok(Self::new(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.chebyshev(CellCoord::new(3, -1)), 3);
        assert_eq!(origin.chebyshev(CellCoord::new(-2, 4)), 4);
        assert_eq!(origin.chebyshev(origin), 0);
    }

    #[test]
    fn test_chebyshev_extremes() {
        let a = CellCoord::new(i64::MIN, 0);
        let b = CellCoord::new(i64::MAX, 0);
        assert_eq!(a.chebyshev(b), u64::MAX);
    }

    #[test]
    fn test_from_lat_lng_floors() {
        let cell = CellCoord::from_lat_lng(0.00015, -0.00005, 1e-4).unwrap();
        assert_eq!(cell, CellCoord::new(1, -1));
    }

    #[test]
    fn test_from_lat_lng_rejects_non_finite() {
        assert!(CellCoord::from_lat_lng(f64::NAN, 0.0, 1e-4).is_none());
        assert!(CellCoord::from_lat_lng(0.0, f64::INFINITY, 1e-4).is_none());
    }

    #[test]
    fn test_key_roundtrip() {
        let coord = CellCoord::new(-12, 345);
        assert_eq!(coord.key(), "-12,345");
        assert_eq!("-12,345".parse::<CellCoord>(), Ok(coord));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("12".parse::<CellCoord>().is_err());
        assert!("a,b".parse::<CellCoord>().is_err());
        assert!("1,2,3".parse::<CellCoord>().is_err());
    }

    #[test]
    fn test_offset_saturates() {
        let coord = CellCoord::new(i64::MAX, i64::MIN).offset(1, -1);
        assert_eq!(coord, CellCoord::new(i64::MAX, i64::MIN));
    }
}
