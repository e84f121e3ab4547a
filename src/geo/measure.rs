use std::str::FromStr;

use geo::{Bearing, Destination, Distance, Geodesic, Haversine, InterpolatePoint};

use crate::error::{Error, Result};

use super::Coordinate;

/// Earth model used for measurements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Great-circle on a sphere of mean Earth radius.
    #[default]
    Haversine,
    /// Geodesic on the WGS84 ellipsoid (Karney).
    Geodesic,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "haversine" | "sphere" | "great-circle" => Ok(Self::Haversine),
            "geodesic" | "ellipsoid" | "wgs84" | "karney" => Ok(Self::Geodesic),
            other => Err(Error::invalid(format!("Unknown distance method: '{other}'"))),
        }
    }
}

/// Distance in metres between `a` and `b`.
pub fn distance(a: Coordinate, b: Coordinate, method: Method) -> f64 {
    match method {
        Method::Haversine => Haversine.distance(a.to_point(), b.to_point()),
        Method::Geodesic => Geodesic.distance(a.to_point(), b.to_point()),
    }
}

/// Initial bearing from `a` towards `b`, in degrees clockwise from north within [0, 360).
pub fn bearing(a: Coordinate, b: Coordinate, method: Method) -> f64 {
    let deg = match method {
        Method::Haversine => Haversine.bearing(a.to_point(), b.to_point()),
        Method::Geodesic => Geodesic.bearing(a.to_point(), b.to_point()),
    };
    deg.rem_euclid(360.0)
}

/// The point reached from `origin` after `meters` along `bearing` (degrees).
pub fn destination(origin: Coordinate, bearing: f64, meters: f64, method: Method) -> Result<Coordinate> {
    if !bearing.is_finite() || !meters.is_finite() {
        return Err(Error::invalid(format!("Bearing and distance must be finite: {bearing}, {meters}")));
    }
    let p = match method {
        Method::Haversine => Haversine.destination(origin.to_point(), bearing, meters),
        Method::Geodesic => Geodesic.destination(origin.to_point(), bearing, meters),
    };
    Coordinate::normalized(p.y(), p.x())
}

/// Point halfway along the path from `a` to `b`.
pub fn midpoint(a: Coordinate, b: Coordinate, method: Method) -> Result<Coordinate> {
    let p = match method {
        Method::Haversine => Haversine.point_at_ratio_between(a.to_point(), b.to_point(), 0.5),
        Method::Geodesic => Geodesic.point_at_ratio_between(a.to_point(), b.to_point(), 0.5),
    };
    Coordinate::normalized(p.y(), p.x())
}

/// Geographic mean of `points` on the unit sphere.
/// Returns `None` for an empty input or when the points cancel out (e.g. antipodes).
pub fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    for c in points {
        let (lat, lon) = (c.lat.to_radians(), c.lon.to_radians());
        x += lat.cos() * lon.cos();
        y += lat.cos() * lon.sin();
        z += lat.sin();
    }
    let norm = (x * x + y * y + z * z).sqrt();
    if points.is_empty() || norm < 1e-12 { return None }

    let lat = (z / norm).asin().to_degrees();
    let lon = y.atan2(x).to_degrees();
    Coordinate::new(lat.clamp(-90.0, 90.0), lon).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate { Coordinate::new(lat, lon).unwrap() }

    #[test]
    fn paris_london() {
        let (paris, london) = (c(48.8566, 2.3522), c(51.5074, -0.1278));
        let h = distance(paris, london, Method::Haversine);
        let g = distance(paris, london, Method::Geodesic);
        assert!((h - 343_500.0).abs() < 2_000.0, "haversine {h}");
        assert!((g - 343_900.0).abs() < 2_000.0, "geodesic {g}");
    }

    #[test]
    fn distance_is_symmetric() {
        let pts = [c(50.033333, 10.35), c(-33.86, 151.21), c(64.13, -21.94), c(0.0, 179.9)];
        for a in pts {
            for b in pts {
                for m in [Method::Haversine, Method::Geodesic] {
                    assert!((distance(a, b, m) - distance(b, a, m)).abs() < 1e-6);
                }
            }
            assert_eq!(distance(a, a, Method::Haversine), 0.0);
        }
    }

    #[test]
    fn bearing_due_east_and_north() {
        let origin = c(0.0, 0.0);
        assert!((bearing(origin, c(0.0, 1.0), Method::Haversine) - 90.0).abs() < 1e-9);
        assert!(bearing(origin, c(1.0, 0.0), Method::Haversine).abs() < 1e-9);
        let west = bearing(origin, c(0.0, -1.0), Method::Geodesic);
        assert!((west - 270.0).abs() < 1e-6, "{west}");
    }

    #[test]
    fn destination_inverts_distance() {
        let origin = c(50.033333, 10.35);
        let target = destination(origin, 45.0, 100_000.0, Method::Haversine).unwrap();
        assert!((distance(origin, target, Method::Haversine) - 100_000.0).abs() < 1e-3);
        assert!(destination(origin, f64::NAN, 1.0, Method::Haversine).is_err());
    }

    #[test]
    fn midpoint_on_equator() {
        let m = midpoint(c(0.0, 0.0), c(0.0, 10.0), Method::Haversine).unwrap();
        assert!(m.lat().abs() < 1e-9 && (m.lon() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn centroid_cases() {
        assert!(centroid(&[]).is_none());
        assert!(centroid(&[c(0.0, 0.0), c(0.0, 180.0)]).is_none());
        let m = centroid(&[c(10.0, 20.0), c(-10.0, 20.0)]).unwrap();
        assert!(m.lat().abs() < 1e-9 && (m.lon() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn method_names() {
        assert_eq!("Geodesic".parse::<Method>().unwrap(), Method::Geodesic);
        assert!("manhattan".parse::<Method>().is_err());
    }
}
