use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use super::domain::Airport;

const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Geographic lookups the rules depend on but do not own.
pub trait Geography: Send + Sync {
    /// Great-circle distance in miles. Must be symmetric.
    fn distance_miles(&self, from: &Airport, to: &Airport) -> f64;

    /// Region membership, keyed by the lower-cased IATA code.
    fn is_in_region(&self, iata_lowercase: &str, region: &str) -> bool;

    /// Human readable name for a region key, if one is known.
    fn region_display(&self, region: &str) -> Option<&str>;
}

/// Haversine distance between two airports, in statute miles.
pub fn great_circle_miles(from: &Airport, to: &Airport) -> f64 {
    let lat1 = from.coordinates.latitude.to_radians();
    let lat2 = to.coordinates.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.coordinates.longitude - from.coordinates.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Region membership sets and display names.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    regions: BTreeMap<String, RegionEntry>,
}

#[derive(Debug, Clone, Default)]
struct RegionEntry {
    display_name: Option<String>,
    airports: BTreeSet<String>,
}

/// Serialized form of a region table document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionTableDocument {
    #[serde(default)]
    pub regions: BTreeMap<String, RegionDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub airports: Vec<String>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region<I, S>(mut self, key: &str, display_name: Option<&str>, airports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.regions.entry(key.to_string()).or_default();
        if let Some(name) = display_name {
            entry.display_name = Some(name.to_string());
        }
        entry.airports.extend(
            airports
                .into_iter()
                .map(|code| code.as_ref().trim().to_ascii_lowercase()),
        );
        self
    }

    pub fn contains(&self, iata_lowercase: &str, region: &str) -> bool {
        self.regions
            .get(region)
            .map(|entry| entry.airports.contains(iata_lowercase))
            .unwrap_or(false)
    }

    pub fn display_name(&self, region: &str) -> Option<&str> {
        self.regions
            .get(region)
            .and_then(|entry| entry.display_name.as_deref())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl From<RegionTableDocument> for RegionTable {
    fn from(document: RegionTableDocument) -> Self {
        document
            .regions
            .into_iter()
            .fold(RegionTable::new(), |table, (key, definition)| {
                table.with_region(&key, definition.name.as_deref(), definition.airports)
            })
    }
}

/// Default geography: haversine distances plus a static region table.
#[derive(Debug, Clone, Default)]
pub struct StaticGeography {
    regions: RegionTable,
}

impl StaticGeography {
    pub fn new(regions: RegionTable) -> Self {
        Self { regions }
    }
}

impl Geography for StaticGeography {
    fn distance_miles(&self, from: &Airport, to: &Airport) -> f64 {
        great_circle_miles(from, to)
    }

    fn is_in_region(&self, iata_lowercase: &str, region: &str) -> bool {
        self.regions.contains(iata_lowercase, region)
    }

    fn region_display(&self, region: &str) -> Option<&str> {
        self.regions.display_name(region)
    }
}
