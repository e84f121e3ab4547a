//! Point geometry on the Earth's surface.
//!
//! Coordinates are `(lat, lon)` decimal degrees validated on construction.
//! Measurements use the metric spaces of the `geo` crate and reprojection
//! goes through `proj4rs`.

mod coord;
mod geojson;
mod measure;
mod proj;
mod regions;

pub use self::coord::Coordinate;
pub use self::geojson::{points_from_geojson, points_to_geojson};
pub use self::measure::{bearing, centroid, destination, distance, midpoint, Method};
pub use self::proj::{project, unproject, utm_proj4, utm_zone, Projection};
pub use self::regions::{eu_aggregate, eu_geocentre, EU_AGGREGATES, EU_GEOCENTRE};
