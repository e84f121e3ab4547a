use super::Coordinate;

/// Geographical centre of the EU after the UK's departure (Gädheim, Bavaria), as `(lat, lon)`.
pub const EU_GEOCENTRE: (f64, f64) = (50.033333, 10.35);

const EU27: [&str; 27] = [
    "BE", "BG", "CZ", "DK", "DE", "EE", "IE", "EL", "ES", "FR",
    "HR", "IT", "CY", "LV", "LT", "LU", "HU", "MT", "NL", "AT",
    "PL", "PT", "RO", "SI", "SK", "FI", "SE",
];
const EU28: [&str; 28] = [
    "BE", "BG", "CZ", "DK", "DE", "EE", "IE", "EL", "ES", "FR",
    "HR", "IT", "CY", "LV", "LT", "LU", "HU", "MT", "NL", "AT",
    "PL", "PT", "RO", "SI", "SK", "FI", "SE", "UK",
];
const EFTA: [&str; 4] = ["IS", "LI", "NO", "CH"];
const CACO: [&str; 5] = ["ME", "MK", "AL", "RS", "TR"];

/// Names accepted by [`eu_aggregate`].
pub const EU_AGGREGATES: [&str; 4] = ["EU28", "EU27", "EFTA", "CACO"];

/// [`EU_GEOCENTRE`] as a [`Coordinate`].
pub fn eu_geocentre() -> Coordinate {
    Coordinate { lat: EU_GEOCENTRE.0, lon: EU_GEOCENTRE.1 }
}

/// Eurostat country codes in protocol order for an aggregate name (case-insensitive).
pub fn eu_aggregate(name: &str) -> Option<&'static [&'static str]> {
    match name.to_ascii_uppercase().as_str() {
        "EU28" => Some(&EU28),
        "EU27" | "EU27_2020" => Some(&EU27),
        "EFTA" => Some(&EFTA),
        "CACO" => Some(&CACO),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates() {
        assert_eq!(eu_aggregate("eu27").unwrap().len(), 27);
        assert!(eu_aggregate("EU28").unwrap().contains(&"UK"));
        assert!(!eu_aggregate("EU27").unwrap().contains(&"UK"));
        assert_eq!(eu_aggregate("EFTA").unwrap(), &["IS", "LI", "NO", "CH"]);
        assert!(eu_aggregate("G7").is_none());
        for name in EU_AGGREGATES {
            assert!(eu_aggregate(name).is_some());
        }
    }

    #[test]
    fn geocentre_is_valid() {
        let c = eu_geocentre();
        assert_eq!(Coordinate::new(c.lat(), c.lon()).unwrap(), c);
    }
}
