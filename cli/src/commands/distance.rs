use anyhow::Result;
use datutils::geo::{bearing, distance, Coordinate, Method};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::DistanceArgs) -> Result<()> {
    let method: Method = args.method.parse()?;
    let a = Coordinate::new(args.lat1, args.lon1)?;
    let b = Coordinate::new(args.lat2, args.lon2)?;

    if cli.verbose > 0 { eprintln!("[distance] {a} -> {b} ({method:?})"); }
    println!("distance_m\t{:.3}", distance(a, b, method));
    println!("bearing_deg\t{:.6}", bearing(a, b, method));
    Ok(())
}
