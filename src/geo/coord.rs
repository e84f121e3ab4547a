use std::fmt;

use geo::Point;
use serde::Serialize;

use crate::error::{Error, Result};

/// A validated `(lat, lon)` pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinate {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside [-90, 90] x [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::invalid(format!("Latitude out of range [-90, 90]: {lat}")));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::invalid(format!("Longitude out of range [-180, 180]: {lon}")));
        }
        Ok(Self { lat, lon })
    }

    /// Wrap a longitude into [-180, 180) and validate the latitude.
    pub fn normalized(lat: f64, lon: f64) -> Result<Self> {
        if !lon.is_finite() {
            return Err(Error::invalid(format!("Longitude is not finite: {lon}")));
        }
        Self::new(lat, (lon + 180.0).rem_euclid(360.0) - 180.0)
    }

    #[inline] pub fn lat(&self) -> f64 { self.lat }
    #[inline] pub fn lon(&self) -> f64 { self.lon }

    /// `geo` point with x = lon, y = lat.
    #[inline]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl TryFrom<Point<f64>> for Coordinate {
    type Error = Error;

    fn try_from(p: Point<f64>) -> Result<Self> {
        Self::new(p.y(), p.x())
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = Error;

    /// From a `(lat, lon)` tuple.
    fn try_from((lat, lon): (f64, f64)) -> Result<Self> {
        Self::new(lat, lon)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        c.to_point()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_enforced() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn normalized_wraps_longitude() {
        let c = Coordinate::normalized(10.0, 190.0).unwrap();
        assert!((c.lon() + 170.0).abs() < 1e-12);
        assert!(Coordinate::normalized(95.0, 0.0).is_err());
    }

    #[test]
    fn point_axis_order() {
        let c = Coordinate::new(50.0, 10.0).unwrap();
        let p = c.to_point();
        assert_eq!((p.x(), p.y()), (10.0, 50.0));
        assert_eq!(Coordinate::try_from(p).unwrap(), c);
    }
}
