use anyhow::{Context, Result};
use datutils::geo::points_to_geojson;
use datutils::io::{self, Content, Format};
use polars::frame::DataFrame;

const LAT_NAMES: [&str; 3] = ["lat", "latitude", "y"];
const LON_NAMES: [&str; 4] = ["lon", "lng", "longitude", "x"];

/// Point GeoJSON from a table, locating the coordinate columns by name.
fn table_to_geojson(df: &DataFrame) -> Result<serde_json::Value> {
    let find = |names: &[&'static str]| names.iter()
        .find(|n| df.column(n).is_ok())
        .copied();
    let (Some(lat), Some(lon)) = (find(&LAT_NAMES), find(&LON_NAMES)) else {
        anyhow::bail!("[convert] a table needs lat/lon columns to become GeoJSON");
    };
    Ok(points_to_geojson(df, lat, lon)?)
}

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ConvertArgs) -> Result<()> {
    let from = match &args.from {
        Some(f) => f.parse()?,
        None => Format::from_path(&args.input)?,
    };
    let to = match &args.to {
        Some(f) => f.parse()?,
        None => Format::from_path(&args.output)?,
    };

    if cli.verbose > 0 { eprintln!("[convert] {} ({from}) -> {} ({to})", args.input.display(), args.output.display()); }
    let content = io::read(&args.input, from)
        .with_context(|| format!("[convert] reading {}", args.input.display()))?;

    // Tables become records when written as JSON; JSON arrays of records become tables.
    let content = match (content, to.is_tabular()) {
        (Content::Json(value), true) => {
            let lines = match &value {
                serde_json::Value::Array(rows) => rows.iter()
                    .map(serde_json::to_string)
                    .collect::<Result<Vec<_>, _>>()?
                    .join("\n"),
                _ => anyhow::bail!("[convert] only a JSON array of records can become a table"),
            };
            Content::Table(io::read_json_records_bytes(lines.as_bytes())?)
        }
        (Content::Table(df), false) if to == Format::GeoJson => Content::Json(table_to_geojson(&df)?),
        (content, _) => content,
    };

    io::write(&args.output, &content, to)
        .with_context(|| format!("[convert] writing {}", args.output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use datutils::io::{read_csv_str, CsvOptions};

    use super::*;

    #[test]
    fn tables_with_coordinates_become_points() {
        let df = read_csv_str("name,latitude,lng\nBerlin,52.52,13.405\n", &CsvOptions::default()).unwrap();
        let gj = table_to_geojson(&df).unwrap();
        assert_eq!(gj["type"], "FeatureCollection");
        assert_eq!(gj["features"][0]["geometry"]["coordinates"], serde_json::json!([13.405, 52.52]));
        assert_eq!(gj["features"][0]["properties"]["name"], "Berlin");

        let no_coords = read_csv_str("a,b\n1,2\n", &CsvOptions::default()).unwrap();
        assert!(table_to_geojson(&no_coords).is_err());
    }
}
