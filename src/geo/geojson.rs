use log::warn;
use polars::prelude::{AnyValue, DataFrame, DataType};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};

use super::Coordinate;

/// Build a GeoJSON FeatureCollection of Points from the `lat_col`/`lon_col`
/// columns of `df`. All other columns become feature properties.
pub fn points_to_geojson(df: &DataFrame, lat_col: &str, lon_col: &str) -> Result<Value> {
    let lat = df.column(lat_col)?.cast(&DataType::Float64)?;
    let lon = df.column(lon_col)?.cast(&DataType::Float64)?;
    let (lats, lons) = (lat.f64()?, lon.f64()?);

    let others: Vec<_> = df.get_columns().iter()
        .filter(|c| c.name().as_str() != lat_col && c.name().as_str() != lon_col)
        .collect();

    let mut features = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let (Some(y), Some(x)) = (lats.get(idx), lons.get(idx)) else {
            return Err(Error::invalid(format!("[geo::geojson] Missing coordinate in row {idx}")));
        };
        let coord = Coordinate::new(y, x)?;

        let mut properties = Map::new();
        for col in &others {
            properties.insert(col.name().to_string(), any_to_json(col.get(idx)?));
        }

        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [coord.lon, coord.lat],
            },
            "properties": properties,
        }));
    }

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

/// Collect the Point features of a GeoJSON FeatureCollection, Feature or bare
/// Point geometry. Features with other geometry types are skipped.
pub fn points_from_geojson(value: &Value) -> Result<Vec<(Coordinate, Map<String, Value>)>> {
    let features: Vec<&Value> = match value["type"].as_str() {
        Some("FeatureCollection") => value["features"].as_array()
            .ok_or_else(|| Error::parse("[geo::geojson]", "FeatureCollection has no \"features\" array"))?
            .iter()
            .collect(),
        Some("Feature") => vec![value],
        Some("Point") => return Ok(vec![(parse_point(value)?, Map::new())]),
        Some(other) => return Err(Error::parse("[geo::geojson]", format!("Unsupported GeoJSON type: {other}"))),
        None => return Err(Error::parse("[geo::geojson]", "GeoJSON object has no \"type\" member")),
    };

    let mut points = Vec::with_capacity(features.len());
    for (idx, feature) in features.into_iter().enumerate() {
        let geometry = &feature["geometry"];
        if geometry["type"].as_str() != Some("Point") {
            warn!("[geo::geojson] Skipping feature {idx}: not a Point geometry");
            continue;
        }
        let properties = feature["properties"].as_object().cloned().unwrap_or_default();
        points.push((parse_point(geometry)?, properties));
    }
    Ok(points)
}

/// Parse the `[lon, lat]` coordinates of a Point geometry.
fn parse_point(geometry: &Value) -> Result<Coordinate> {
    let coords = geometry["coordinates"].as_array()
        .filter(|c| c.len() >= 2)
        .ok_or_else(|| Error::parse("[geo::geojson]", "Point needs [lon, lat] coordinates"))?;
    match (coords[0].as_f64(), coords[1].as_f64()) {
        (Some(lon), Some(lat)) => Coordinate::new(lat, lon),
        _ => Err(Error::parse("[geo::geojson]", "Point coordinates must be numbers")),
    }
}

fn any_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => json!(b),
        AnyValue::String(s) => json!(s),
        AnyValue::StringOwned(s) => json!(s.as_str()),
        AnyValue::Int8(v) => json!(v),
        AnyValue::Int16(v) => json!(v),
        AnyValue::Int32(v) => json!(v),
        AnyValue::Int64(v) => json!(v),
        AnyValue::UInt8(v) => json!(v),
        AnyValue::UInt16(v) => json!(v),
        AnyValue::UInt32(v) => json!(v),
        AnyValue::UInt64(v) => json!(v),
        AnyValue::Float32(v) => json!(v),
        AnyValue::Float64(v) => json!(v),
        other => json!(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    #[test]
    fn table_to_points_and_back() {
        let df = df!(
            "name" => ["Gädheim", "Brussels"],
            "lat" => [50.033333, 50.8503],
            "lon" => [10.35, 4.3517],
            "pop" => [1272i64, 1_208_542],
        ).unwrap();

        let gj = points_to_geojson(&df, "lat", "lon").unwrap();
        assert_eq!(gj["features"][0]["geometry"]["coordinates"], json!([10.35, 50.033333]));
        assert_eq!(gj["features"][1]["properties"], json!({"name": "Brussels", "pop": 1_208_542}));

        let points = points_from_geojson(&gj).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].0, Coordinate::new(50.033333, 10.35).unwrap());
        assert_eq!(points[0].1["name"], json!("Gädheim"));
    }

    #[test]
    fn out_of_range_rows_fail() {
        let df = df!("lat" => [91.0], "lon" => [0.0]).unwrap();
        assert!(points_to_geojson(&df, "lat", "lon").is_err());
        assert!(points_to_geojson(&df, "y", "lon").is_err());
    }

    #[test]
    fn non_point_features_are_skipped() {
        let gj = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}, "properties": {}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [4.35, 50.85]}, "properties": null},
            ]
        });
        let points = points_from_geojson(&gj).unwrap();
        assert_eq!(points.len(), 1);
        assert!(points[0].1.is_empty());
        assert!(points_from_geojson(&json!({"features": []})).is_err());
    }
}
