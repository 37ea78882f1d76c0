//! Named Local Winds
//!
//! Many regions have a traditional name for the wind from a given quarter:
//! the Bora on the Adriatic, the Santa Ana in Southern California, the
//! Fremantle Doctor in Western Australia. Regions are bounding boxes
//! checked from most specific to broadest. The first region containing the
//! station decides: if it has no name for the current direction the generic
//! `"<Direction> wind"` is returned rather than a broader region's name.

use crate::angles::Cardinal;

use Cardinal::{E, N, NE, NW, S, SE, SW, W};

struct WindRegion {
    lat: (f64, f64),
    lon: (f64, f64),
    names: &'static [(Cardinal, &'static str)],
}

impl WindRegion {
    fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat.0..=self.lat.1).contains(&latitude) && (self.lon.0..=self.lon.1).contains(&longitude)
    }
}

const REGIONS: &[WindRegion] = &[
    // Adriatic
    WindRegion {
        lat: (40.0, 46.5),
        lon: (12.0, 20.0),
        names: &[
            (N, "Tramontana"), (NE, "Bora"), (E, "Levante"), (SE, "Jugo"),
            (S, "Ostro"), (SW, "Libeccio"), (W, "Ponente"), (NW, "Maestrale"),
        ],
    },
    // Southern California
    WindRegion {
        lat: (32.0, 37.0),
        lon: (-122.0, -114.0),
        names: &[(NE, "Santa Ana"), (E, "Santa Ana")],
    },
    // Northern California
    WindRegion {
        lat: (37.0, 42.0),
        lon: (-124.0, -119.0),
        names: &[(NE, "Diablo"), (E, "Diablo")],
    },
    // Pacific Northwest
    WindRegion {
        lat: (42.0, 55.0),
        lon: (-126.0, -115.0),
        names: &[(E, "Chinook"), (SE, "Chinook"), (NE, "Williwaw")],
    },
    // Rocky Mountain chinook belt
    WindRegion {
        lat: (45.0, 55.0),
        lon: (-116.0, -100.0),
        names: &[(W, "Chinook"), (SW, "Chinook")],
    },
    // Southern Great Plains
    WindRegion {
        lat: (25.0, 40.0),
        lon: (-105.0, -90.0),
        names: &[(N, "Blue Norther"), (NW, "Blue Norther")],
    },
    // Cape of Good Hope
    WindRegion {
        lat: (-36.0, -25.0),
        lon: (14.0, 36.0),
        names: &[(SE, "Cape Doctor"), (NE, "Berg wind"), (N, "Berg wind")],
    },
    // Southern Cone
    WindRegion {
        lat: (-55.0, -25.0),
        lon: (-75.0, -35.0),
        names: &[(S, "Minuano"), (SW, "Pampero"), (W, "Zonda")],
    },
    // Southwest Australia
    WindRegion {
        lat: (-38.0, -28.0),
        lon: (113.0, 130.0),
        names: &[(SW, "Fremantle Doctor"), (S, "Fremantle Doctor")],
    },
    // New Zealand
    WindRegion {
        lat: (-47.0, -34.0),
        lon: (166.0, 178.0),
        names: &[(NW, "Nor'wester"), (S, "Southerly Buster")],
    },
    // Japan
    WindRegion {
        lat: (30.0, 46.0),
        lon: (128.0, 146.0),
        names: &[(NW, "Karakkaze"), (N, "Karakkaze"), (E, "Yamase")],
    },
    // West Africa
    WindRegion {
        lat: (5.0, 20.0),
        lon: (-18.0, 15.0),
        names: &[(NE, "Harmattan"), (N, "Harmattan")],
    },
    // Arabian Peninsula
    WindRegion {
        lat: (12.0, 35.0),
        lon: (33.0, 63.0),
        names: &[
            (N, "Shamal"), (NW, "Shamal"), (SE, "Khamsin"), (S, "Khamsin"), (SW, "Kaus"),
        ],
    },
    // Mediterranean basin
    WindRegion {
        lat: (30.0, 47.0),
        lon: (-6.0, 42.0),
        names: &[
            (N, "Tramontana"), (NE, "Greco"), (E, "Levante"), (SE, "Scirocco"),
            (S, "Ostro"), (SW, "Libeccio"), (W, "Ponente"), (NW, "Maestrale"),
        ],
    },
];

/// Traditional name of the wind blowing from `cardinal` at a location
pub fn named_wind(latitude: f64, longitude: f64, cardinal: Cardinal) -> String {
    let regional = REGIONS
        .iter()
        .find(|region| region.contains(latitude, longitude))
        .and_then(|region| region.names.iter().find(|(c, _)| *c == cardinal))
        .map(|(_, name)| *name);

    match regional {
        Some(name) => name.to_string(),
        None => format!("{} wind", cardinal.name()),
    }
}

/// Traditional name of the wind blowing from a bearing in degrees
pub fn named_wind_from_degrees(latitude: f64, longitude: f64, degrees: f64) -> String {
    named_wind(latitude, longitude, Cardinal::from_degrees(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_region_wins() {
        // Trieste: Adriatic, not Mediterranean
        assert_eq!(named_wind(45.65, 13.77, NE), "Bora");
        // Marseille: Mediterranean
        assert_eq!(named_wind(43.3, 5.4, NE), "Greco");
    }

    #[test]
    fn unnamed_direction_does_not_fall_through() {
        // Los Angeles: Southern California names only NE and E
        assert_eq!(named_wind(34.05, -118.25, W), "West wind");
        assert_eq!(named_wind(34.05, -118.25, E), "Santa Ana");
    }

    #[test]
    fn outside_all_regions() {
        assert_eq!(named_wind(51.5, -0.1, SW), "Southwest wind");
        assert_eq!(named_wind_from_degrees(51.5, -0.1, 359.0), "North wind");
    }

    #[test]
    fn southern_hemisphere_region() {
        assert_eq!(named_wind_from_degrees(-32.0, 115.8, 220.0), "Fremantle Doctor");
    }
}
