use std::collections::BTreeMap;

use crate::earnings::domain::{Airport, Coordinates, EarningsRecord, Segment};
use crate::earnings::geo::{Geography, RegionTable};
use crate::earnings::rules::{DistanceBand, DistanceRule, RuleIdentity};

/// Geography returning a fixed distance for every pair of airports.
pub(super) struct FixedGeography {
    pub(super) distance: f64,
    pub(super) regions: RegionTable,
}

impl FixedGeography {
    pub(super) fn new(distance: f64) -> Self {
        Self {
            distance,
            regions: region_table(),
        }
    }
}

impl Geography for FixedGeography {
    fn distance_miles(&self, _from: &Airport, _to: &Airport) -> f64 {
        self.distance
    }

    fn is_in_region(&self, iata_lowercase: &str, region: &str) -> bool {
        self.regions.contains(iata_lowercase, region)
    }

    fn region_display(&self, region: &str) -> Option<&str> {
        self.regions.display_name(region)
    }
}

pub(super) fn region_table() -> RegionTable {
    RegionTable::new()
        .with_region("europe", Some("Europe"), ["LHR", "CDG"])
        .with_region("north_america", Some("North America"), ["LAX", "JFK"])
        .with_region("pacific_islands", None, ["NAN"])
}

fn airport(iata: &str, city: &str, country: &str, latitude: f64, longitude: f64) -> Airport {
    Airport::new(iata, city, country, Coordinates { latitude, longitude })
}

pub(super) fn syd() -> Airport {
    airport("SYD", "Sydney", "Australia", -33.9461, 151.1772)
}

pub(super) fn mel() -> Airport {
    airport("MEL", "Melbourne", "Australia", -37.6733, 144.8433)
}

pub(super) fn akl() -> Airport {
    airport("AKL", "Auckland", "New Zealand", -37.0082, 174.7850)
}

pub(super) fn lax() -> Airport {
    airport("LAX", "Los Angeles", "United States", 33.9425, -118.4081)
}

pub(super) fn lhr() -> Airport {
    airport("LHR", "London", "United Kingdom", 51.4700, -0.4543)
}

pub(super) fn nan() -> Airport {
    airport("NAN", "Nadi", "Fiji", -17.7554, 177.4434)
}

pub(super) fn segment(from: Airport, to: Airport) -> Segment {
    Segment::new(from, to)
}

pub(super) fn earnings(entries: &[(&str, u32, u32)]) -> BTreeMap<String, EarningsRecord> {
    entries
        .iter()
        .map(|(category, points, credits)| {
            (
                category.to_string(),
                EarningsRecord::new(*points, *credits),
            )
        })
        .collect()
}

pub(super) fn identity(name: &str) -> RuleIdentity {
    RuleIdentity::new(name, format!("https://example.test/rules/{name}"))
        .expect("valid identity")
}

/// Three contiguous bands covering (0, 600], (600, 1200] and (1200, inf).
pub(super) fn standard_bands() -> Vec<DistanceBand> {
    vec![
        DistanceBand::new(
            0.0,
            Some(600.0),
            earnings(&[("discount_economy", 400, 10), ("economy", 800, 20)]),
        ),
        DistanceBand::new(
            600.0,
            Some(1200.0),
            earnings(&[("discount_economy", 600, 15), ("economy", 1000, 30)]),
        ),
        DistanceBand::new(1200.0, None, earnings(&[("economy", 1600, 40)])),
    ]
}

pub(super) fn distance_rule() -> DistanceRule {
    DistanceRule::new(identity("domestic-distance"), standard_bands()).expect("valid bands")
}
