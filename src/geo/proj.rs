use std::{fmt, str::FromStr};

use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::error::{Error, Result};

use super::Coordinate;

/// Coordinate reference systems understood by [`project`] and [`unproject`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Projection {
    /// EPSG:4326, geographic lon/lat on WGS84.
    #[default]
    Wgs84,
    /// EPSG:4258, geographic lon/lat on ETRS89.
    Etrs89,
    /// EPSG:3857, spherical web Mercator.
    WebMercator,
    /// EPSG:3035, Lambert azimuthal equal-area for Europe.
    Laea,
}

impl Projection {
    pub const ALL: [Projection; 4] = [Self::Wgs84, Self::Etrs89, Self::WebMercator, Self::Laea];

    pub fn epsg(&self) -> u32 {
        match self {
            Self::Wgs84 => 4326,
            Self::Etrs89 => 4258,
            Self::WebMercator => 3857,
            Self::Laea => 3035,
        }
    }

    pub fn from_epsg(code: u32) -> Result<Self> {
        Self::ALL.into_iter()
            .find(|p| p.epsg() == code)
            .ok_or_else(|| Error::invalid(format!("Unsupported EPSG code: {code}")))
    }

    /// Whether coordinates are angular (degrees) rather than metres.
    pub fn is_geographic(&self) -> bool {
        matches!(self, Self::Wgs84 | Self::Etrs89)
    }

    /// PROJ.4 definition of this CRS.
    pub fn proj4(&self) -> &'static str {
        match self {
            Self::Wgs84 => "+proj=longlat +datum=WGS84 +no_defs +type=crs",
            Self::Etrs89 => "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs",
            Self::WebMercator => "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs",
            Self::Laea => "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs",
        }
    }

    fn build(&self) -> Result<Proj4> {
        let proj_string = self.proj4();
        Proj4::from_proj_string(proj_string)
            .map_err(|e| Error::Projection(format!("failed to build PROJ.4 '{proj_string}': {e}")))
    }
}

impl FromStr for Projection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase().replace(':', "");
        match key.as_str() {
            "WGS84" | "EPSG4326" | "4326" => Ok(Self::Wgs84),
            "ETRS89" | "EPSG4258" | "4258" | "LONGLAT" => Ok(Self::Etrs89),
            "MERCATOR" | "MERC" | "WEBMERCATOR" | "EPSG3857" | "3857" => Ok(Self::WebMercator),
            "LAEA" | "EPSG3035" | "3035" => Ok(Self::Laea),
            _ => Err(Error::invalid(format!("Projection not recognised: '{s}'"))),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

/// Project a WGS84 coordinate into `to`. Returns `(x, y)`: metres for projected
/// systems, `(lon, lat)` degrees for geographic ones.
pub fn project(coord: Coordinate, to: Projection) -> Result<(f64, f64)> {
    let from = Projection::Wgs84.build()?;
    let target = to.build()?;

    // Map coords → radians in, meters out.
    let mut point = (coord.lon.to_radians(), coord.lat.to_radians(), 0.0);
    transform(&from, &target, &mut point)
        .map_err(|e| Error::Projection(format!("{coord} to {to}: {e}")))?;

    if to.is_geographic() {
        Ok((point.0.to_degrees(), point.1.to_degrees()))
    } else {
        Ok((point.0, point.1))
    }
}

/// Inverse of [`project`]: map `(x, y)` in `from` back to a WGS84 coordinate.
pub fn unproject(x: f64, y: f64, from: Projection) -> Result<Coordinate> {
    if !x.is_finite() || !y.is_finite() {
        return Err(Error::invalid(format!("Projected coordinates must be finite: ({x}, {y})")));
    }
    let source = from.build()?;
    let target = Projection::Wgs84.build()?;

    let mut point = if from.is_geographic() { (x.to_radians(), y.to_radians(), 0.0) } else { (x, y, 0.0) };
    transform(&source, &target, &mut point)
        .map_err(|e| Error::Projection(format!("({x}, {y}) from {from}: {e}")))?;

    Coordinate::normalized(point.1.to_degrees(), point.0.to_degrees())
}

/// UTM zone (1..=60) containing `coord`, and whether it lies in the northern hemisphere.
pub fn utm_zone(coord: Coordinate) -> (u32, bool) {
    let zone = (((coord.lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u32;
    (zone, coord.lat >= 0.0)
}

/// PROJ.4 string of the WGS84 UTM zone containing `coord`.
pub fn utm_proj4(coord: Coordinate) -> String {
    let (zone, north) = utm_zone(coord);
    let south = if north { "" } else { " +south" };
    format!("+proj=utm +zone={zone}{south} +datum=WGS84 +units=m +no_defs +type=crs")
}
